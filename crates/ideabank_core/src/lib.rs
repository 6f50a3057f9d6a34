//! Core domain logic for IdeaBank.
//! This crate is the single source of truth for business invariants.

pub mod creds;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use creds::{CredError, CredentialStore, DbCredentials, FileCredentialStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::idea::{
    now_epoch_ms, validate_content, Idea, IdeaId, IdeaValidationError, MAX_CONTENT_CHARS,
};
pub use repo::idea_repo::{IdeaRepository, RepoError, RepoResult};
pub use store::{IdeaStore, MemoryIdeaStore, SqliteIdeaStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
