//! Goal collection binding.

use crate::model::goal::{Goal, GoalPatch, NewGoal};
use crate::model::{EntityId, EntityKind};
use crate::repo::{Record, Repository};
use crate::search::GoalFilter;
use crate::validation::{validate_goal, ValidationResult};
use chrono::{DateTime, NaiveDate, Utc};

pub type GoalRepository<'s> = Repository<'s, Goal>;

impl Record for Goal {
    type Draft = NewGoal;
    type Patch = GoalPatch;
    type Filter = GoalFilter;

    const KIND: EntityKind = EntityKind::Goal;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(draft: NewGoal, id: EntityId, now: DateTime<Utc>) -> Self {
        Goal::create(draft, id, now)
    }

    fn apply_patch(&self, patch: GoalPatch, _now: DateTime<Utc>) -> Self {
        self.merged(patch)
    }

    fn check(&self, previous: Option<&Self>, today: NaiveDate) -> ValidationResult {
        validate_goal(self, previous, today)
    }
}

impl GoalRepository<'_> {
    /// Mean progress over all goals, `None` when there are none.
    pub fn average_progress(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let total: i64 = self.all().iter().map(|goal| i64::from(goal.progress)).sum();
        Some(total as f64 / self.len() as f64)
    }
}
