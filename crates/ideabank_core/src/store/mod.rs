//! Record store contract and persistence drivers.
//!
//! # Responsibility
//! - Define the keyed CRUD contract the repository layer consumes.
//! - Isolate storage details (SQL, in-memory maps) behind one trait.
//!
//! # Invariants
//! - `insert` never overwrites: an occupied id is a `Conflict`.
//! - `update`/`delete` on an absent id is a `NotFound`, not a no-op.
//! - `list_all` returns records ordered ascending by id.
//! - Every operation fully succeeds or fully fails; no partial writes are
//!   observable through this contract.

use crate::db::DbError;
use crate::model::idea::{Idea, IdeaId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryIdeaStore;
pub use sqlite::SqliteIdeaStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure surfaced by a record store driver.
#[derive(Debug)]
pub enum StoreError {
    /// Target id is already occupied by a live record.
    Conflict(IdeaId),
    /// Referenced id does not exist.
    NotFound(IdeaId),
    /// Underlying persistence failure (connectivity, constraint, I/O).
    Db(DbError),
    /// Connection schema version does not match this binary.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing from the connected database.
    MissingRequiredTable(&'static str),
    /// Required column is missing from the connected database.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict(id) => write!(f, "idea id already exists: {id}"),
            Self::NotFound(id) => write!(f, "idea not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Keyed CRUD contract over durable idea storage.
///
/// The repository layer is generic over this trait; production code uses
/// [`SqliteIdeaStore`] while tests and embedders may use
/// [`MemoryIdeaStore`].
pub trait IdeaStore {
    /// Inserts one record. Fails with `Conflict` when the id is occupied.
    fn insert(&mut self, idea: &Idea) -> StoreResult<()>;
    /// Returns the record at `id`, or `None` when absent.
    fn find_by_id(&self, id: IdeaId) -> StoreResult<Option<Idea>>;
    /// Returns all live records ordered ascending by id.
    fn list_all(&self) -> StoreResult<Vec<Idea>>;
    /// Overwrites the record at `idea.id`. Fails with `NotFound` when absent.
    fn update(&mut self, idea: &Idea) -> StoreResult<()>;
    /// Removes the record at `id`. Fails with `NotFound` when absent.
    fn delete(&mut self, id: IdeaId) -> StoreResult<()>;
    /// Removes every record. Succeeds on an empty store.
    fn delete_all(&mut self) -> StoreResult<()>;
}
