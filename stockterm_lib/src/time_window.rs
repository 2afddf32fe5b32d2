//! Converts logical time spans ("5 years") into millisecond windows and past dates.
//!
//! Calendar units use fixed-length approximations: a month is 31 days and a
//! year is 365 days, matching how the fetch range and the in-process filter
//! agree with each other.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};

pub const ONE_DAY_MS: i64 = 86_400_000;
pub const ONE_WEEK_MS: i64 = ONE_DAY_MS * 7;
pub const ONE_MONTH_MS: i64 = ONE_DAY_MS * 31;
pub const ONE_YEAR_MS: i64 = ONE_DAY_MS * 365;

/// Closed set of calendar units. Every unit has a non-zero length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    pub fn millis(self) -> i64 {
        match self {
            TimeUnit::Day => ONE_DAY_MS,
            TimeUnit::Week => ONE_WEEK_MS,
            TimeUnit::Month => ONE_MONTH_MS,
            TimeUnit::Year => ONE_YEAR_MS,
        }
    }

    fn plural_label(self) -> &'static str {
        match self {
            TimeUnit::Day => "Days",
            TimeUnit::Week => "Weeks",
            TimeUnit::Month => "Months",
            TimeUnit::Year => "Years",
        }
    }
}

/// A span such as "6 months", used both to size a fetch and to filter a series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSpec {
    pub multiplier: u32,
    pub unit: TimeUnit,
}

impl WindowSpec {
    pub const fn new(multiplier: u32, unit: TimeUnit) -> Self {
        Self { multiplier, unit }
    }

    pub fn duration_ms(&self) -> i64 {
        duration_ms(self.multiplier, self.unit)
    }
}

impl fmt::Display for WindowSpec {
    /// Renders the caption form used in reports, e.g. `6 Months`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.multiplier, self.unit.plural_label())
    }
}

/// `multiplier * unit` in milliseconds.
pub fn duration_ms(multiplier: u32, unit: TimeUnit) -> i64 {
    i64::from(multiplier) * unit.millis()
}

/// The calendar date `window` before `now`, truncated to the day (UTC).
pub fn past_date(now: DateTime<Utc>, window: WindowSpec) -> NaiveDate {
    (now - Duration::milliseconds(window.duration_ms())).date_naive()
}

/// [`past_date`] formatted as `YYYY-MM-DD`. Only used to build fetch ranges.
pub fn past_date_label(now: DateTime<Utc>, window: WindowSpec) -> String {
    past_date(now, window).format("%Y-%m-%d").to_string()
}
