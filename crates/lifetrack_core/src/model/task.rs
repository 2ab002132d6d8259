//! Task records.

use crate::model::dates::deserialize_optional_date;
use crate::model::EntityId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Blocked,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Blocked => "Blocked",
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// Persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: EntityId,
    pub title: String,
    /// Empty when the task has no description.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_date"
    )]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Caller input for a new task. Id and `created_at` are assigned on add.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    /// `Not Started`, `Medium` priority, no description or due date.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update. `None` leaves the field as stored; `due_date:
/// Some(None)` clears the due date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl Task {
    pub fn create(draft: NewTask, id: EntityId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            due_date: draft.due_date,
            created_at: now,
        }
    }

    /// Copy of `self` with `patch` applied; `id` and `created_at` are kept.
    pub fn merged(&self, patch: TaskPatch) -> Self {
        Self {
            id: self.id,
            title: patch.title.unwrap_or_else(|| self.title.clone()),
            description: patch
                .description
                .unwrap_or_else(|| self.description.clone()),
            status: patch.status.unwrap_or(self.status),
            priority: patch.priority.unwrap_or(self.priority),
            due_date: patch.due_date.unwrap_or(self.due_date),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn status_uses_display_labels_on_the_wire() {
        let json = serde_json::to_string(&TaskStatus::NotStarted).unwrap();
        assert_eq!(json, "\"Not Started\"");
        let parsed: TaskStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(parsed, TaskStatus::InProgress);
    }

    #[test]
    fn merged_keeps_identity_and_clears_due_date_on_request() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
        let mut draft = NewTask::new("Ship release");
        draft.due_date = NaiveDate::from_ymd_opt(2026, 1, 2);
        let task = Task::create(draft, Uuid::new_v4(), now);

        let merged = task.merged(TaskPatch {
            priority: Some(TaskPriority::High),
            due_date: Some(None),
            ..TaskPatch::default()
        });

        assert_eq!(merged.id, task.id);
        assert_eq!(merged.created_at, now);
        assert_eq!(merged.priority, TaskPriority::High);
        assert_eq!(merged.title, "Ship release");
        assert_eq!(merged.due_date, None);
    }

    #[test]
    fn legacy_record_with_timestamp_due_date_loads() {
        let json = r#"{
            "id": "6f1c1c52-8f7a-4c53-9d4a-0e0b5d1f9a11",
            "title": "Pay rent",
            "description": "",
            "status": "Blocked",
            "priority": "Low",
            "dueDate": "2026-02-01T00:00:00.000Z",
            "createdAt": "2026-01-15T09:30:00.000Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, TaskStatus::Blocked);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 2, 1));
    }
}
