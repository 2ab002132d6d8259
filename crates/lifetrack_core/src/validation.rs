//! Field rules for every record kind.
//!
//! # Responsibility
//! - Check a complete candidate record (after patch merge) against the
//!   field constraints of its kind.
//!
//! # Invariants
//! - Rules run in declaration order; the first failure is reported.
//! - Validators are pure: no I/O, time comes from the caller.
//! - "Not in the past" only applies to dates the mutation introduces. A
//!   stored date that has since passed does not block other edits.
//! - Likewise an event colour is only checked when the mutation sets it, so
//!   records carrying a legacy colour name stay editable.

use crate::model::event::Event;
use crate::model::goal::{Goal, PROGRESS_MAX, PROGRESS_MIN};
use crate::model::note::{normalize_tag, Note};
use crate::model::task::Task;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const NOTE_CONTENT_MAX_CHARS: usize = 5000;
pub const NOTE_TAGS_MAX: usize = 10;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color regex"));

/// First rule a candidate record failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTitle,
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    DateInPast {
        field: &'static str,
        date: NaiveDate,
        today: NaiveDate,
    },
    ProgressOutOfRange(i32),
    TooManyTags {
        max: usize,
        actual: usize,
    },
    BlankTag,
    DuplicateTag(String),
    EndBeforeStart {
        start: NaiveDate,
        end: NaiveDate,
    },
    InvalidColor(String),
}

impl ValidationError {
    /// Stable machine-readable reason, safe to log.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::TooLong { .. } => "too_long",
            Self::DateInPast { .. } => "date_in_past",
            Self::ProgressOutOfRange(_) => "progress_out_of_range",
            Self::TooManyTags { .. } => "too_many_tags",
            Self::BlankTag => "blank_tag",
            Self::DuplicateTag(_) => "duplicate_tag",
            Self::EndBeforeStart { .. } => "end_before_start",
            Self::InvalidColor(_) => "invalid_color",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title is required"),
            Self::TooLong { field, max, actual } => {
                write!(f, "{field} is {actual} characters; at most {max} allowed")
            }
            Self::DateInPast { field, date, today } => {
                write!(f, "{field} {date} is before today ({today})")
            }
            Self::ProgressOutOfRange(value) => write!(
                f,
                "progress {value} is outside {PROGRESS_MIN}..={PROGRESS_MAX}"
            ),
            Self::TooManyTags { max, actual } => {
                write!(f, "{actual} tags given; at most {max} allowed")
            }
            Self::BlankTag => write!(f, "tags cannot be blank"),
            Self::DuplicateTag(tag) => write!(f, "duplicate tag `{tag}`"),
            Self::EndBeforeStart { start, end } => {
                write!(f, "event ends {end} before it starts {start}")
            }
            Self::InvalidColor(value) => write!(f, "color `{value}` is not a #RRGGBB value"),
        }
    }
}

impl Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

pub fn validate_task(task: &Task, previous: Option<&Task>, today: NaiveDate) -> ValidationResult {
    check_title(&task.title)?;
    check_length("description", &task.description, DESCRIPTION_MAX_CHARS)?;
    check_not_past(
        "dueDate",
        task.due_date,
        previous.and_then(|p| p.due_date),
        today,
    )
}

pub fn validate_note(note: &Note) -> ValidationResult {
    check_title(&note.title)?;
    check_length("content", &note.content, NOTE_CONTENT_MAX_CHARS)?;
    check_tags(&note.tags)
}

pub fn validate_goal(goal: &Goal, previous: Option<&Goal>, today: NaiveDate) -> ValidationResult {
    check_title(&goal.title)?;
    check_length("description", &goal.description, DESCRIPTION_MAX_CHARS)?;
    check_not_past(
        "deadline",
        goal.deadline,
        previous.and_then(|p| p.deadline),
        today,
    )?;
    if !(PROGRESS_MIN..=PROGRESS_MAX).contains(&goal.progress) {
        return Err(ValidationError::ProgressOutOfRange(goal.progress));
    }
    Ok(())
}

pub fn validate_event(event: &Event, previous: Option<&Event>) -> ValidationResult {
    check_title(&event.title)?;
    check_length("description", &event.description, DESCRIPTION_MAX_CHARS)?;
    if let Some(end) = event.end {
        if end < event.start {
            return Err(ValidationError::EndBeforeStart {
                start: event.start,
                end,
            });
        }
    }
    let color_unchanged = previous.is_some_and(|stored| stored.color == event.color);
    if !color_unchanged && !HEX_COLOR_RE.is_match(&event.color) {
        return Err(ValidationError::InvalidColor(event.color.clone()));
    }
    Ok(())
}

fn check_title(title: &str) -> ValidationResult {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    check_length("title", title, TITLE_MAX_CHARS)
}

fn check_length(field: &'static str, value: &str, max: usize) -> ValidationResult {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}

fn check_not_past(
    field: &'static str,
    date: Option<NaiveDate>,
    stored: Option<NaiveDate>,
    today: NaiveDate,
) -> ValidationResult {
    match date {
        Some(date) if Some(date) != stored && date < today => {
            Err(ValidationError::DateInPast { field, date, today })
        }
        _ => Ok(()),
    }
}

fn check_tags(tags: &[String]) -> ValidationResult {
    if tags.len() > NOTE_TAGS_MAX {
        return Err(ValidationError::TooManyTags {
            max: NOTE_TAGS_MAX,
            actual: tags.len(),
        });
    }
    let mut seen = HashSet::with_capacity(tags.len());
    for tag in tags {
        let normalized = normalize_tag(tag);
        if normalized.is_empty() {
            return Err(ValidationError::BlankTag);
        }
        if !seen.insert(normalized) {
            return Err(ValidationError::DuplicateTag(tag.clone()));
        }
    }
    Ok(())
}
