//! Core domain logic for LifeTrack: tasks, notes, goals and calendar events
//! kept in a local key-value store.
//! This crate is the single source of truth for record rules.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::event::{Event, EventPatch, NewEvent, DEFAULT_EVENT_COLOR};
pub use model::goal::{Goal, GoalPatch, GoalStatus, NewGoal};
pub use model::note::{normalize_tag, NewNote, Note, NotePatch};
pub use model::task::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};
pub use model::{EntityId, EntityKind};
pub use repo::{
    EventRepository, GoalRepository, NoteRepository, Record, RepoError, RepoResult, Repository,
    TaskRepository,
};
pub use search::{
    filter_records, DateRange, EventFilter, FilterError, GoalFilter, NoteFilter, ProgressRange,
    TaskFilter,
};
pub use service::preference_service::{PreferenceService, Theme};
pub use service::transfer_service::{
    ExportBundle, ExportFile, ImportSummary, TransferError, TransferResult, TransferService,
};
pub use store::{KvBackend, MemoryBackend, SqliteBackend, Storage, StorageKey};
pub use validation::ValidationError;

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
