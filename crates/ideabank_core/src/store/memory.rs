//! In-memory driver for the record store contract.
//!
//! # Responsibility
//! - Provide the same contract semantics as the SQLite driver without any
//!   I/O, for tests and embedders.
//!
//! # Invariants
//! - Iteration order follows the `BTreeMap` key order, so `list_all` is
//!   ascending by id for free.

use crate::model::idea::{Idea, IdeaId};
use crate::store::{IdeaStore, StoreError, StoreResult};
use std::collections::BTreeMap;

/// Map-backed record store with the same semantics as the SQLite driver.
#[derive(Debug, Default)]
pub struct MemoryIdeaStore {
    ideas: BTreeMap<IdeaId, Idea>,
}

impl MemoryIdeaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records, for test assertions.
    pub fn len(&self) -> usize {
        self.ideas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ideas.is_empty()
    }
}

impl IdeaStore for MemoryIdeaStore {
    fn insert(&mut self, idea: &Idea) -> StoreResult<()> {
        if self.ideas.contains_key(&idea.id) {
            return Err(StoreError::Conflict(idea.id));
        }
        self.ideas.insert(idea.id, idea.clone());
        Ok(())
    }

    fn find_by_id(&self, id: IdeaId) -> StoreResult<Option<Idea>> {
        Ok(self.ideas.get(&id).cloned())
    }

    fn list_all(&self) -> StoreResult<Vec<Idea>> {
        Ok(self.ideas.values().cloned().collect())
    }

    fn update(&mut self, idea: &Idea) -> StoreResult<()> {
        match self.ideas.get_mut(&idea.id) {
            Some(existing) => {
                *existing = idea.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(idea.id)),
        }
    }

    fn delete(&mut self, id: IdeaId) -> StoreResult<()> {
        match self.ideas.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id)),
        }
    }

    fn delete_all(&mut self) -> StoreResult<()> {
        self.ideas.clear();
        Ok(())
    }
}
