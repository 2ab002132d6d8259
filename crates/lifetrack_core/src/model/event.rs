//! Calendar event records.

use crate::model::dates::{deserialize_date, deserialize_optional_date};
use crate::model::EntityId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Colour given to events created without one.
pub const DEFAULT_EVENT_COLOR: &str = "#3B82F6";

fn default_color() -> String {
    DEFAULT_EVENT_COLOR.to_string()
}

/// Persisted calendar event. Events have no creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredEvent")]
pub struct Event {
    pub id: EntityId,
    pub title: String,
    pub start: NaiveDate,
    /// Inclusive last day; `None` for single-day events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    pub color: String,
    pub description: String,
}

/// Every shape an event has been written in.
///
/// Calendar-widget records keep the colour under `backgroundColor` and the
/// description under `extendedProps.description`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEvent {
    id: EntityId,
    title: String,
    #[serde(deserialize_with = "deserialize_date")]
    start: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    end: Option<NaiveDate>,
    #[serde(default = "default_color", alias = "backgroundColor")]
    color: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    extended_props: Option<ExtendedProps>,
}

#[derive(Default, Deserialize)]
struct ExtendedProps {
    #[serde(default)]
    description: Option<String>,
}

impl From<StoredEvent> for Event {
    fn from(stored: StoredEvent) -> Self {
        let description = stored
            .description
            .filter(|text| !text.is_empty())
            .or_else(|| stored.extended_props.and_then(|props| props.description))
            .unwrap_or_default();
        Self {
            id: stored.id,
            title: stored.title,
            start: stored.start,
            end: stored.end,
            color: stored.color,
            description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub color: String,
    pub description: String,
}

impl NewEvent {
    /// Single-day event in the default colour.
    pub fn new(title: impl Into<String>, start: NaiveDate) -> Self {
        Self {
            title: title.into(),
            start,
            end: None,
            color: default_color(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<Option<NaiveDate>>,
    pub color: Option<String>,
    pub description: Option<String>,
}

impl Event {
    pub fn create(draft: NewEvent, id: EntityId) -> Self {
        Self {
            id,
            title: draft.title,
            start: draft.start,
            end: draft.end,
            color: draft.color,
            description: draft.description,
        }
    }

    pub fn merged(&self, patch: EventPatch) -> Self {
        Self {
            id: self.id,
            title: patch.title.unwrap_or_else(|| self.title.clone()),
            start: patch.start.unwrap_or(self.start),
            end: patch.end.unwrap_or(self.end),
            color: patch.color.unwrap_or_else(|| self.color.clone()),
            description: patch
                .description
                .unwrap_or_else(|| self.description.clone()),
        }
    }
}
