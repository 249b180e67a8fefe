//! Time and calendar rules.
//!
//! Due dates and availability dates are instants, but "due today" and the
//! date filters compare calendar days. Those comparisons use a fixed business
//! offset (East Africa Time by default) rather than whatever timezone the
//! server happens to run in.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Source of the current instant. Swapped for a fixed clock in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessCalendar {
    offset: FixedOffset,
}

impl BusinessCalendar {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Calendar with the offset given in whole hours east of UTC.
    /// Returns `None` outside the valid -23..=23 range.
    pub fn from_hours(hours: i32) -> Option<Self> {
        FixedOffset::east_opt(hours * 3600).map(Self::new)
    }

    /// Local calendar date of an instant
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    pub fn same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.date_of(a) == self.date_of(b)
    }
}

impl Default for BusinessCalendar {
    fn default() -> Self {
        Self {
            offset: FixedOffset::east_opt(3 * 3600).unwrap_or_else(|| Utc.fix()),
        }
    }
}

/// Whole days from `now` until `target`, rounded up: `ceil((target - now) / 1 day)`.
///
/// Anything later today counts as 1, an instant already past counts as 0
/// until a full day has gone by, then -1, and so on.
pub fn days_until(target: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (target - now).num_milliseconds();
    -(-millis).div_euclid(MILLIS_PER_DAY)
}
