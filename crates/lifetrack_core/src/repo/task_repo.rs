//! Task collection binding.

use crate::model::task::{NewTask, Task, TaskPatch};
use crate::model::{EntityId, EntityKind};
use crate::repo::{Record, Repository};
use crate::search::TaskFilter;
use crate::validation::{validate_task, ValidationResult};
use chrono::{DateTime, NaiveDate, Utc};

pub type TaskRepository<'s> = Repository<'s, Task>;

impl Record for Task {
    type Draft = NewTask;
    type Patch = TaskPatch;
    type Filter = TaskFilter;

    const KIND: EntityKind = EntityKind::Task;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(draft: NewTask, id: EntityId, now: DateTime<Utc>) -> Self {
        Task::create(draft, id, now)
    }

    fn apply_patch(&self, patch: TaskPatch, _now: DateTime<Utc>) -> Self {
        self.merged(patch)
    }

    fn check(&self, previous: Option<&Self>, today: NaiveDate) -> ValidationResult {
        validate_task(self, previous, today)
    }
}
