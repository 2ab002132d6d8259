//! Goal records.

use crate::model::dates::deserialize_optional_date;
use crate::model::EntityId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const PROGRESS_MIN: i32 = 0;
pub const PROGRESS_MAX: i32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
}

impl GoalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
        }
    }
}

impl Display for GoalStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted goal.
///
/// Backups written before goals carried a creation time load with the Unix
/// epoch as `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_date"
    )]
    pub deadline: Option<NaiveDate>,
    /// Percent complete, `0..=100` for every stored goal.
    #[serde(default)]
    pub progress: i32,
    #[serde(default)]
    pub milestones: Vec<String>,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewGoal {
    pub title: String,
    pub description: String,
    pub deadline: Option<NaiveDate>,
    pub progress: i32,
    pub milestones: Vec<String>,
    pub status: GoalStatus,
}

impl NewGoal {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<Option<NaiveDate>>,
    pub progress: Option<i32>,
    pub milestones: Option<Vec<String>>,
    pub status: Option<GoalStatus>,
}

impl Goal {
    pub fn create(draft: NewGoal, id: EntityId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            deadline: draft.deadline,
            progress: draft.progress,
            milestones: draft.milestones,
            status: draft.status,
            created_at: now,
        }
    }

    pub fn merged(&self, patch: GoalPatch) -> Self {
        Self {
            id: self.id,
            title: patch.title.unwrap_or_else(|| self.title.clone()),
            description: patch
                .description
                .unwrap_or_else(|| self.description.clone()),
            deadline: patch.deadline.unwrap_or(self.deadline),
            progress: patch.progress.unwrap_or(self.progress),
            milestones: patch
                .milestones
                .unwrap_or_else(|| self.milestones.clone()),
            status: patch.status.unwrap_or(self.status),
            created_at: self.created_at,
        }
    }
}
