//! Backup bundle export and import.
//!
//! # Responsibility
//! - Export the persisted collections as one pretty-printed JSON object.
//! - Import such an object, overwriting each collection it carries.
//!
//! # Invariants
//! - Import parses and validates every present collection before writing
//!   any of them; malformed input changes nothing.
//! - Imported records pass their kind's field rules and ids are unique per
//!   collection.
//! - Keys absent from (or `null` in) the bundle leave their entry untouched.
//! - Import writes the store only. Repositories must `reload()` afterwards.

use crate::clock::Clock;
use crate::model::event::Event;
use crate::model::goal::Goal;
use crate::model::note::Note;
use crate::model::task::Task;
use crate::model::{EntityId, EntityKind};
use crate::repo::Record;
use crate::store::{Storage, StorageKey};
use crate::validation::ValidationError;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const BACKUP_FILE_PREFIX: &str = "lifetrack_backup_";

pub type TransferResult<T> = Result<T, TransferError>;

#[derive(Debug)]
pub enum TransferError {
    /// Input is not a bundle object or a collection failed to parse.
    InvalidBundle(serde_json::Error),
    /// A record in the bundle breaks a field rule.
    InvalidRecord {
        kind: EntityKind,
        id: EntityId,
        source: ValidationError,
    },
    /// Two records of one collection share an id.
    DuplicateId { kind: EntityKind, id: EntityId },
    Serialize(serde_json::Error),
    /// The store refused the write for this entry.
    WriteFailed(StorageKey),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBundle(err) => write!(f, "invalid backup bundle: {err}"),
            Self::InvalidRecord { kind, id, source } => {
                write!(f, "invalid {kind} {id} in backup: {source}")
            }
            Self::DuplicateId { kind, id } => write!(f, "duplicate {kind} id {id} in backup"),
            Self::Serialize(err) => write!(f, "failed to serialize backup: {err}"),
            Self::WriteFailed(key) => write!(f, "failed to write `{}`", key.as_str()),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidBundle(err) | Self::Serialize(err) => Some(err),
            Self::InvalidRecord { source, .. } => Some(source),
            Self::DuplicateId { .. } | Self::WriteFailed(_) => None,
        }
    }
}

/// On-disk backup shape. `None` exports as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportBundle {
    #[serde(default)]
    pub notes: Option<Vec<Note>>,
    #[serde(default)]
    pub goals: Option<Vec<Goal>>,
    #[serde(default)]
    pub tasks: Option<Vec<Task>>,
    #[serde(default)]
    pub events: Option<Vec<Event>>,
}

/// Ready-to-save export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

/// Records written per collection; `None` when the bundle omitted it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub notes: Option<usize>,
    pub goals: Option<usize>,
    pub tasks: Option<usize>,
    pub events: Option<usize>,
}

pub struct TransferService<'s> {
    store: &'s Storage,
    clock: &'s dyn Clock,
}

impl<'s> TransferService<'s> {
    pub fn new(store: &'s Storage, clock: &'s dyn Clock) -> Self {
        Self { store, clock }
    }

    /// Current store contents as a bundle.
    pub fn export_bundle(&self) -> ExportBundle {
        ExportBundle {
            notes: self.store.get(StorageKey::Notes),
            goals: self.store.get(StorageKey::Goals),
            tasks: self.store.get(StorageKey::Tasks),
            events: self.store.get(StorageKey::Events),
        }
    }

    /// Serializes the bundle and names it after the export time.
    pub fn export(&self) -> TransferResult<ExportFile> {
        let bundle = self.export_bundle();
        let contents =
            serde_json::to_string_pretty(&bundle).map_err(TransferError::Serialize)?;
        let file_name = backup_file_name(self.clock.now());
        info!(
            "event=export module=transfer status=ok bytes={} file={}",
            contents.len(),
            file_name
        );
        Ok(ExportFile {
            file_name,
            contents,
        })
    }

    /// Overwrites each collection present in `text`.
    ///
    /// # Errors
    /// - [`TransferError::InvalidBundle`] before any write when parsing fails.
    /// - [`TransferError::InvalidRecord`] or [`TransferError::DuplicateId`]
    ///   before any write when a record is unacceptable.
    /// - [`TransferError::WriteFailed`] when the store rejects a write;
    ///   entries written before it keep their new contents.
    pub fn import(&self, text: &str) -> TransferResult<ImportSummary> {
        let bundle: ExportBundle = serde_json::from_str(text).map_err(|err| {
            warn!("event=import module=transfer status=invalid error={err}");
            TransferError::InvalidBundle(err)
        })?;
        check_collection(bundle.notes.as_deref())?;
        check_collection(bundle.goals.as_deref())?;
        check_collection(bundle.tasks.as_deref())?;
        check_collection(bundle.events.as_deref())?;

        let summary = ImportSummary {
            notes: self.overwrite(StorageKey::Notes, bundle.notes.as_deref())?,
            goals: self.overwrite(StorageKey::Goals, bundle.goals.as_deref())?,
            tasks: self.overwrite(StorageKey::Tasks, bundle.tasks.as_deref())?,
            events: self.overwrite(StorageKey::Events, bundle.events.as_deref())?,
        };
        info!(
            "event=import module=transfer status=ok notes={:?} goals={:?} tasks={:?} events={:?}",
            summary.notes, summary.goals, summary.tasks, summary.events
        );
        Ok(summary)
    }

    fn overwrite<T: Serialize>(
        &self,
        key: StorageKey,
        records: Option<&[T]>,
    ) -> TransferResult<Option<usize>> {
        let Some(records) = records else {
            return Ok(None);
        };
        if !self.store.set(key, records) {
            return Err(TransferError::WriteFailed(key));
        }
        Ok(Some(records.len()))
    }
}

fn check_collection<R: Record>(records: Option<&[R]>) -> TransferResult<()> {
    let Some(records) = records else {
        return Ok(());
    };
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        let id = record.id();
        if !seen.insert(id) {
            warn!(
                "event=import module=transfer status=rejected entity={} reason=duplicate_id id={}",
                R::KIND,
                id
            );
            return Err(TransferError::DuplicateId { kind: R::KIND, id });
        }
        record.check_stored().map_err(|source| {
            warn!(
                "event=import module=transfer status=rejected entity={} reason={} id={}",
                R::KIND,
                source.code(),
                id
            );
            TransferError::InvalidRecord {
                kind: R::KIND,
                id,
                source,
            }
        })?;
    }
    Ok(())
}

/// `lifetrack_backup_<UTC time>.json`, with `-` in place of `:`.
pub fn backup_file_name(at: DateTime<Utc>) -> String {
    format!(
        "{BACKUP_FILE_PREFIX}{}.json",
        at.format("%Y-%m-%dT%H-%M-%S%.3fZ")
    )
}
