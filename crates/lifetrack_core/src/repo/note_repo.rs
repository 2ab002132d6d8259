//! Note collection binding.
//!
//! Every successful update stamps `updatedAt`, including an empty patch.

use crate::model::note::{normalize_tag, NewNote, Note, NotePatch};
use crate::model::{EntityId, EntityKind};
use crate::repo::{Record, Repository};
use crate::search::NoteFilter;
use crate::validation::{validate_note, ValidationResult};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;

pub type NoteRepository<'s> = Repository<'s, Note>;

impl Record for Note {
    type Draft = NewNote;
    type Patch = NotePatch;
    type Filter = NoteFilter;

    const KIND: EntityKind = EntityKind::Note;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(draft: NewNote, id: EntityId, now: DateTime<Utc>) -> Self {
        Note::create(draft, id, now)
    }

    fn apply_patch(&self, patch: NotePatch, now: DateTime<Utc>) -> Self {
        self.merged(patch, now)
    }

    fn check(&self, _previous: Option<&Self>, _today: NaiveDate) -> ValidationResult {
        validate_note(self)
    }
}

impl NoteRepository<'_> {
    /// Distinct tags across all notes, lower-cased and sorted.
    pub fn list_tags(&self) -> Vec<String> {
        self.all()
            .iter()
            .flat_map(|note| note.tags.iter())
            .map(|tag| normalize_tag(tag))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
