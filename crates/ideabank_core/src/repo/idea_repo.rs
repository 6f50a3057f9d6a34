//! Idea lifecycle repository.
//!
//! # Responsibility
//! - Assign the lowest free positive id on auto-id creation.
//! - Renumber ids to a dense 1..N sequence without collisions.
//! - Move a record between ids while preserving content and timestamps.
//!
//! # Invariants
//! - Id moves are delete+reinsert; a record's id is never mutated in place,
//!   since the store contract keys updates by id.
//! - Renumbering is two-phase: every record is parked at a temporary id
//!   strictly below all live ids before any final id is assigned, so no
//!   intermediate write can collide.
//! - Re-running `reorder_ids` from any partially-renumbered state converges
//!   to a clean dense sequence.

use crate::model::idea::{now_epoch_ms, validate_content, Idea, IdeaId, IdeaValidationError};
use crate::store::{IdeaStore, StoreError, StoreResult};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Semantic failure of a lifecycle operation.
#[derive(Debug)]
pub enum RepoError {
    /// Caller input failed validation; recoverable by reprompting.
    Validation(IdeaValidationError),
    /// Referenced id does not exist.
    NotFound(IdeaId),
    /// Target id is already occupied by a different live record.
    Conflict(IdeaId),
    /// Underlying persistence failure, surfaced undecorated.
    Store(StoreError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "idea with id {id} not found"),
            Self::Conflict(id) => write!(f, "idea with id {id} already exists"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::Conflict(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<IdeaValidationError> for RepoError {
    fn from(value: IdeaValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Conflict(id) => Self::Conflict(id),
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Lifecycle manager for idea records, generic over the store driver.
///
/// Takes its store at construction; there is no ambient state. Every
/// operation re-reads the store so externally visible changes are observed.
pub struct IdeaRepository<S: IdeaStore> {
    store: S,
}

impl<S: IdeaStore> IdeaRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates an idea at the lowest unused positive id.
    ///
    /// The id is the smallest integer >= 1 absent from the live id set, not
    /// max+1, so gaps left by deletions are refilled without a full reorder.
    pub fn create_idea(&mut self, content: &str) -> RepoResult<Idea> {
        validate_content(content)?;
        let id = self.lowest_free_id()?;
        let idea = Idea::new(id, content, now_epoch_ms());
        self.store.insert(&idea)?;
        Ok(idea)
    }

    /// Creates an idea at a caller-chosen id.
    ///
    /// # Errors
    /// - `Conflict` when the id is already occupied; never overwrites.
    /// - `Validation` when content is empty or too long.
    pub fn create_idea_with_id(&mut self, id: IdeaId, content: &str) -> RepoResult<Idea> {
        validate_content(content)?;
        let idea = Idea::new(id, content, now_epoch_ms());
        self.store.insert(&idea)?;
        Ok(idea)
    }

    /// Returns all live ideas ordered ascending by id.
    pub fn get_all_ideas(&self) -> RepoResult<Vec<Idea>> {
        Ok(self.store.list_all()?)
    }

    /// Returns the idea at `id`, or `None` when absent.
    ///
    /// Absence is a result, not an error; callers distinguish it from
    /// store failures.
    pub fn get_idea(&self, id: IdeaId) -> RepoResult<Option<Idea>> {
        Ok(self.store.find_by_id(id)?)
    }

    /// Replaces the content of an existing idea.
    ///
    /// Leaves `id` and `created_at` untouched. `updated_at` never regresses
    /// even if the wall clock stepped backwards between calls.
    pub fn update_content(&mut self, id: IdeaId, new_content: &str) -> RepoResult<Idea> {
        validate_content(new_content)?;
        let mut idea = self
            .store
            .find_by_id(id)?
            .ok_or(RepoError::NotFound(id))?;

        idea.content = new_content.to_string();
        idea.updated_at = now_epoch_ms().max(idea.updated_at).max(idea.created_at);
        self.store.update(&idea)?;
        Ok(idea)
    }

    /// Permanently removes the idea at `id`.
    pub fn delete_idea(&mut self, id: IdeaId) -> RepoResult<()> {
        self.store.delete(id)?;
        Ok(())
    }

    /// Moves an idea from `old_id` to `new_id`, preserving content and both
    /// timestamps.
    ///
    /// # Errors
    /// - `NotFound` when `old_id` is absent.
    /// - `Conflict` when `new_id` is held by a different live record.
    ///
    /// Reidentifying to the same id is a no-op success. No other record's
    /// id changes.
    pub fn reidentify(&mut self, old_id: IdeaId, new_id: IdeaId) -> RepoResult<Idea> {
        let idea = self
            .store
            .find_by_id(old_id)?
            .ok_or(RepoError::NotFound(old_id))?;

        if new_id == old_id {
            return Ok(idea);
        }
        if self.store.find_by_id(new_id)?.is_some() {
            return Err(RepoError::Conflict(new_id));
        }

        let moved = move_record(&mut self.store, &idea, new_id)?;
        Ok(moved)
    }

    /// Renumbers every live idea to a dense 1..N sequence.
    ///
    /// Order is ascending `created_at`, ties broken by current id. The
    /// renumbering runs in two fully persisted phases:
    ///
    /// 1. every record moves to a temporary id strictly below
    ///    `min(0, lowest live id)`, so temporaries collide neither with
    ///    not-yet-moved records nor with the final 1..N range;
    /// 2. temporaries are walked in creation order and assigned 1..N.
    ///
    /// A crash between the phases leaves records at temporary ids; running
    /// this operation again from that state converges to a clean dense
    /// sequence. Returns the number of records renumbered.
    pub fn reorder_ids(&mut self) -> RepoResult<usize> {
        let mut ideas = self.store.list_all()?;
        if ideas.is_empty() {
            return Ok(0);
        }
        ideas.sort_by_key(|idea| (idea.created_at, idea.id));

        info!(
            "event=reorder_ids module=repo status=start count={}",
            ideas.len()
        );

        // Temporaries start one below the smallest live id (and below zero),
        // descending per record. Disjoint from every live id and from 1..N.
        let lowest_live = ideas.iter().map(|idea| idea.id).min().unwrap_or(0);
        let temp_base = lowest_live.min(0) - 1;

        // Phase 1: park everything at temporary ids.
        let mut parked = Vec::with_capacity(ideas.len());
        for (offset, idea) in ideas.iter().enumerate() {
            let temp_id = temp_base - offset as IdeaId;
            parked.push(move_record(&mut self.store, idea, temp_id)?);
        }

        // Phase 2: assign final dense ids in creation order.
        for (offset, idea) in parked.iter().enumerate() {
            let final_id = offset as IdeaId + 1;
            move_record(&mut self.store, idea, final_id)?;
        }

        info!(
            "event=reorder_ids module=repo status=ok count={}",
            parked.len()
        );
        Ok(parked.len())
    }

    /// Deletes every live idea. Idempotent; an empty store succeeds.
    pub fn remove_all(&mut self) -> RepoResult<()> {
        self.store.delete_all()?;
        Ok(())
    }

    fn lowest_free_id(&self) -> RepoResult<IdeaId> {
        // list_all is id-ordered, so the first gap in the positive range is
        // found in one pass.
        let mut candidate: IdeaId = 1;
        for idea in self.store.list_all()? {
            if idea.id < candidate {
                continue;
            }
            if idea.id == candidate {
                candidate += 1;
            } else {
                break;
            }
        }
        Ok(candidate)
    }
}

/// Moves one record to a new id through the store contract.
///
/// The contract keys `update` by id, so a move is delete+reinsert with all
/// other fields preserved.
fn move_record<S: IdeaStore>(store: &mut S, idea: &Idea, new_id: IdeaId) -> StoreResult<Idea> {
    let moved = Idea {
        id: new_id,
        content: idea.content.clone(),
        created_at: idea.created_at,
        updated_at: idea.updated_at,
    };
    store.delete(idea.id)?;
    store.insert(&moved)?;
    Ok(moved)
}
