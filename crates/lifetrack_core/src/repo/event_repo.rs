//! Calendar event collection binding.

use crate::model::event::{Event, EventPatch, NewEvent};
use crate::model::{EntityId, EntityKind};
use crate::repo::{Record, Repository};
use crate::search::EventFilter;
use crate::validation::{validate_event, ValidationResult};
use chrono::{DateTime, NaiveDate, Utc};

pub type EventRepository<'s> = Repository<'s, Event>;

impl Record for Event {
    type Draft = NewEvent;
    type Patch = EventPatch;
    type Filter = EventFilter;

    const KIND: EntityKind = EntityKind::Event;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(draft: NewEvent, id: EntityId, _now: DateTime<Utc>) -> Self {
        Event::create(draft, id)
    }

    fn apply_patch(&self, patch: EventPatch, _now: DateTime<Utc>) -> Self {
        self.merged(patch)
    }

    fn check(&self, previous: Option<&Self>, _today: NaiveDate) -> ValidationResult {
        validate_event(self, previous)
    }
}

impl EventRepository<'_> {
    /// Events whose `start..=end` span covers `date`, in collection order.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        self.all()
            .iter()
            .filter(|event| event.start <= date && date <= event.end.unwrap_or(event.start))
            .collect()
    }
}
