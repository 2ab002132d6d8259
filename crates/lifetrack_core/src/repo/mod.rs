//! Store-backed collections, one per record kind.
//!
//! # Responsibility
//! - Keep each kind's collection in memory, newest first.
//! - Validate before mutating; write the whole collection after mutating.
//! - Maintain the filtered view for the last applied search.
//!
//! # Invariants
//! - A rejected add/update leaves collection, view and store untouched.
//! - Store failures are absorbed by [`Storage`](crate::store::Storage) and
//!   never surface here.

pub mod event_repo;
pub mod goal_repo;
pub mod note_repo;
mod repository;
pub mod task_repo;

pub use event_repo::EventRepository;
pub use goal_repo::GoalRepository;
pub use note_repo::NoteRepository;
pub use repository::Repository;
pub use task_repo::TaskRepository;

use crate::model::{EntityId, EntityKind};
use crate::search::{RecordFilter, Searchable};
use crate::validation::{ValidationError, ValidationResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Expected failures of repository mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(ValidationError),
    NotFound(EntityId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Binding between a record type and the generic [`Repository`].
pub trait Record: Clone + Serialize + DeserializeOwned + Searchable {
    /// Caller input for `add`.
    type Draft;
    /// Caller input for `update`.
    type Patch;
    type Filter: RecordFilter<Self> + Default;

    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    /// Builds a new record; `now` becomes its creation time where it has one.
    fn from_draft(draft: Self::Draft, id: EntityId, now: DateTime<Utc>) -> Self;

    /// Merges `patch` over `self`, keeping id and creation time.
    fn apply_patch(&self, patch: Self::Patch, now: DateTime<Utc>) -> Self;

    /// Runs the kind's validator. `previous` is the stored version on update.
    fn check(&self, previous: Option<&Self>, today: NaiveDate) -> ValidationResult;

    /// Validates a record that arrives already stored, e.g. from a backup.
    ///
    /// Field rules apply; dates and colours are taken as written.
    fn check_stored(&self) -> ValidationResult {
        self.check(Some(self), NaiveDate::MIN)
    }
}
