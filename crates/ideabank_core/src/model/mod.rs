//! Domain model for idea records.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Keep validation rules next to the data they protect.
//!
//! # Invariants
//! - Every persisted record is identified by a unique integer `IdeaId`.
//! - Deletion is physical; there is no tombstone state.

pub mod idea;
