//! Database credential persistence.
//!
//! # Responsibility
//! - Model connection credentials and their serialized blob format.
//! - Persist/retrieve the blob behind a small store interface so platform
//!   backends stay swappable.
//!
//! # Invariants
//! - Credentials are stored under one fixed application identifier; there
//!   is exactly one saved credential set at a time.
//! - The file driver restricts the blob to owner-only permissions on Unix.
//! - Passwords are never logged.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed application identifier used as the stored blob's file name.
pub const CREDENTIAL_TARGET: &str = "ideabank-db-credentials.json";

pub type CredResult<T> = Result<T, CredError>;

/// Failure while persisting or retrieving credentials.
#[derive(Debug)]
pub enum CredError {
    Io(std::io::Error),
    Serde(serde_json::Error),
}

impl Display for CredError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "credential storage i/o failure: {err}"),
            Self::Serde(err) => write!(f, "credential blob is not valid json: {err}"),
        }
    }
}

impl Error for CredError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serde(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CredError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CredError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// Connection credentials for the backing database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbCredentials {
    pub server: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl DbCredentials {
    /// Renders the engine connection string.
    pub fn connection_string(&self) -> String {
        format!(
            "server={};port={};database={};user={};password={}",
            self.server, self.port, self.database, self.username, self.password
        )
    }
}

/// Persistence interface for the saved credential blob.
pub trait CredentialStore {
    /// Saves credentials, replacing any previously saved set.
    fn save(&self, credentials: &DbCredentials) -> CredResult<()>;
    /// Loads the saved credentials, or `None` when nothing is saved.
    fn load(&self) -> CredResult<Option<DbCredentials>>;
    /// Removes saved credentials. Returns whether anything was removed.
    fn remove(&self) -> CredResult<bool>;
    /// Returns whether saved credentials exist.
    fn exists(&self) -> bool;
}

/// File-backed credential store.
///
/// Serializes the credentials as a JSON blob at a fixed file name inside
/// the given application directory. This replaces the OS-native secret
/// manager binding with portable infrastructure behind the same interface.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store rooted at `app_dir`, using the fixed blob file name.
    pub fn new(app_dir: impl AsRef<Path>) -> Self {
        Self {
            path: app_dir.as_ref().join(CREDENTIAL_TARGET),
        }
    }

    /// Path of the stored blob.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, credentials: &DbCredentials) -> CredResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let blob = serde_json::to_vec_pretty(credentials)?;
        fs::write(&self.path, blob)?;
        restrict_to_owner(&self.path)?;
        Ok(())
    }

    fn load(&self) -> CredResult<Option<DbCredentials>> {
        let blob = match fs::read(&self.path) {
            Ok(blob) => blob,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let credentials = serde_json::from_slice(&blob)?;
        Ok(Some(credentials))
    }

    fn remove(&self) -> CredResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
