//! Idea domain model.
//!
//! # Responsibility
//! - Define the canonical record managed by the repository layer.
//! - Enforce content and timestamp validation before persistence.
//!
//! # Invariants
//! - `id` is unique across live records; the repository owns assignment.
//! - `created_at` is set once at creation and never changes afterwards.
//! - `updated_at` is never earlier than `created_at`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Signed integer primary key for ideas.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Negative values are reserved by the repository as temporary IDs during
/// renumbering, but callers may assign them explicitly as well.
pub type IdeaId = i64;

/// Maximum accepted content length, in characters.
pub const MAX_CONTENT_CHARS: usize = 1000;

/// Canonical persisted record for one idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    /// Primary key and default listing order.
    pub id: IdeaId,
    /// Free-form idea text. Never empty or whitespace-only once persisted.
    pub content: String,
    /// Creation timestamp in Unix epoch milliseconds. Immutable.
    pub created_at: i64,
    /// Timestamp of the last content mutation, in Unix epoch milliseconds.
    pub updated_at: i64,
}

impl Idea {
    /// Creates a new idea with both timestamps set to `timestamp_ms`.
    pub fn new(id: IdeaId, content: impl Into<String>, timestamp_ms: i64) -> Self {
        Self {
            id,
            content: content.into(),
            created_at: timestamp_ms,
            updated_at: timestamp_ms,
        }
    }

    /// Validates this record against the persistence contract.
    ///
    /// # Errors
    /// - `EmptyContent` when content is empty or whitespace-only.
    /// - `ContentTooLong` when content exceeds `MAX_CONTENT_CHARS`.
    /// - `TimestampOrder` when `updated_at` precedes `created_at`.
    pub fn validate(&self) -> Result<(), IdeaValidationError> {
        validate_content(&self.content)?;
        if self.updated_at < self.created_at {
            return Err(IdeaValidationError::TimestampOrder {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }
}

/// Validates idea text against the content contract.
pub fn validate_content(content: &str) -> Result<(), IdeaValidationError> {
    if content.trim().is_empty() {
        return Err(IdeaValidationError::EmptyContent);
    }
    let length = content.chars().count();
    if length > MAX_CONTENT_CHARS {
        return Err(IdeaValidationError::ContentTooLong { length });
    }
    Ok(())
}

/// Returns the current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}

/// Validation failure for idea content or timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdeaValidationError {
    EmptyContent,
    ContentTooLong { length: usize },
    TimestampOrder { created_at: i64, updated_at: i64 },
}

impl Display for IdeaValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "idea content cannot be empty"),
            Self::ContentTooLong { length } => write!(
                f,
                "idea content is {length} characters, maximum is {MAX_CONTENT_CHARS}"
            ),
            Self::TimestampOrder {
                created_at,
                updated_at,
            } => write!(
                f,
                "updated_at ({updated_at}) must be >= created_at ({created_at})"
            ),
        }
    }
}

impl Error for IdeaValidationError {}
