//! Typed structured filters.
//!
//! Ranges are inclusive and validated on construction. A record whose date
//! field is unset passes every date range.

use crate::model::event::Event;
use crate::model::goal::{Goal, GoalStatus, PROGRESS_MAX, PROGRESS_MIN};
use crate::model::note::Note;
use crate::model::task::{Task, TaskPriority, TaskStatus};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    InvertedDateRange { start: NaiveDate, end: NaiveDate },
    InvalidProgressRange { min: i32, max: i32 },
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvertedDateRange { start, end } => {
                write!(f, "date range starts {start} after it ends {end}")
            }
            Self::InvalidProgressRange { min, max } => write!(
                f,
                "progress range {min}..={max} must satisfy {PROGRESS_MIN} <= min <= max <= {PROGRESS_MAX}"
            ),
        }
    }
}

impl Error for FilterError {}

/// Inclusive date range; either end may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, FilterError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(FilterError::InvertedDateRange { start, end });
            }
        }
        Ok(Self { start, end })
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self, FilterError> {
        Self::new(Some(start), Some(end))
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// `None` always passes.
    pub fn admits(&self, date: Option<NaiveDate>) -> bool {
        let Some(date) = date else {
            return true;
        };
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Inclusive progress range within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressRange {
    min: i32,
    max: i32,
}

impl ProgressRange {
    pub fn new(min: i32, max: i32) -> Result<Self, FilterError> {
        if min < PROGRESS_MIN || max > PROGRESS_MAX || min > max {
            return Err(FilterError::InvalidProgressRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn contains(&self, progress: i32) -> bool {
        (self.min..=self.max).contains(&progress)
    }
}

/// Structured predicate for one record kind.
pub trait RecordFilter<R> {
    fn matches(&self, record: &R) -> bool;
    /// True when the filter constrains nothing.
    fn is_empty(&self) -> bool;
}

fn admits_member<T: Eq + std::hash::Hash>(set: &HashSet<T>, value: &T) -> bool {
    set.is_empty() || set.contains(value)
}

/// Empty sets mean "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub statuses: HashSet<TaskStatus>,
    pub priorities: HashSet<TaskPriority>,
    pub due: Option<DateRange>,
}

impl RecordFilter<Task> for TaskFilter {
    fn matches(&self, task: &Task) -> bool {
        admits_member(&self.statuses, &task.status)
            && admits_member(&self.priorities, &task.priority)
            && self.due.map_or(true, |range| range.admits(task.due_date))
    }

    fn is_empty(&self) -> bool {
        self.statuses.is_empty() && self.priorities.is_empty() && self.due.is_none()
    }
}

/// `tags` matches notes carrying any listed tag, ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub tags: Vec<String>,
    /// Applied to the UTC date of `updated_at`.
    pub updated: Option<DateRange>,
}

impl RecordFilter<Note> for NoteFilter {
    fn matches(&self, note: &Note) -> bool {
        let tag_ok = self.tags.is_empty() || self.tags.iter().any(|tag| note.has_tag(tag));
        tag_ok
            && self
                .updated
                .map_or(true, |range| range.admits(Some(note.updated_at.date_naive())))
    }

    fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.updated.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalFilter {
    pub statuses: HashSet<GoalStatus>,
    pub progress: Option<ProgressRange>,
    pub deadline: Option<DateRange>,
}

impl RecordFilter<Goal> for GoalFilter {
    fn matches(&self, goal: &Goal) -> bool {
        admits_member(&self.statuses, &goal.status)
            && self.progress.map_or(true, |range| range.contains(goal.progress))
            && self.deadline.map_or(true, |range| range.admits(goal.deadline))
    }

    fn is_empty(&self) -> bool {
        self.statuses.is_empty() && self.progress.is_none() && self.deadline.is_none()
    }
}

/// `dates` is matched against the event start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub dates: Option<DateRange>,
}

impl RecordFilter<Event> for EventFilter {
    fn matches(&self, event: &Event) -> bool {
        self.dates.map_or(true, |range| range.admits(Some(event.start)))
    }

    fn is_empty(&self) -> bool {
        self.dates.is_none()
    }
}
