//! Repository layer: business rules for the idea id lifecycle.
//!
//! # Responsibility
//! - Own id assignment, uniqueness, renumbering and reidentification.
//! - Delegate durable storage to an injected `IdeaStore` driver.
//!
//! # Invariants
//! - Ids are unique across live records at every observable point.
//! - Repository operations re-read the store on every call; nothing is
//!   cached across calls.

pub mod idea_repo;
