//! Time source injected into repositories.
//!
//! Repositories never call `Utc::now()` directly so that timestamp and
//! "not in the past" rules can be exercised deterministically.
//!
//! Timestamps are UTC. "Today" is the user's local calendar date, since due
//! dates and deadlines are entered as local dates.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use std::cell::Cell;

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Manually driven clock for tests and replay.
///
/// `today` follows the UTC date of `now` unless pinned with
/// [`FixedClock::set_today`], which stands in for a non-UTC local zone.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
    today: Cell<Option<NaiveDate>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
            today: Cell::new(None),
        }
    }

    pub fn set_today(&self, today: NaiveDate) {
        self.today.set(Some(today));
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn today(&self) -> NaiveDate {
        self.today
            .get()
            .unwrap_or_else(|| self.now.get().date_naive())
    }
}
