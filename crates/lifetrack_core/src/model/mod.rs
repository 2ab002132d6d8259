//! Domain records for tasks, notes, goals and calendar events.
//!
//! # Responsibility
//! - Define persisted record shapes plus their create (draft) and merge
//!   (patch) inputs.
//!
//! # Invariants
//! - Every record is identified by an [`EntityId`] assigned at creation.
//! - `created_at` is never changed by a patch.
//! - Serialized field names are camelCase, matching existing backup files.

pub mod dates;
pub mod event;
pub mod goal;
pub mod note;
pub mod task;

use crate::store::StorageKey;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable record identifier, serialized as a hyphenated UUID string.
pub type EntityId = Uuid;

/// The four persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Task,
    Note,
    Goal,
    Event,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Note => "note",
            Self::Goal => "goal",
            Self::Event => "event",
        }
    }

    /// Store entry holding this kind's collection.
    pub fn storage_key(self) -> StorageKey {
        match self {
            Self::Task => StorageKey::Tasks,
            Self::Note => StorageKey::Notes,
            Self::Goal => StorageKey::Goals,
            Self::Event => StorageKey::Events,
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
