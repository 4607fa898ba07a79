//! Holiday calendars and the holiday oracle
//!
//! Deterministic, pure logic. No IO, no wall-clock, no randomness.
//!
//! A [`HolidayCalendar`] answers whether a single date is a holiday. The
//! [`HolidayOracle`] wraps any calendar and classifies a date by its distance
//! to the next holiday, which is what the traffic resolver consumes.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fmt;

pub mod oracle;
pub mod us_federal;

pub use oracle::*;
pub use us_federal::*;

/// A source of holiday dates
pub trait HolidayCalendar: fmt::Debug + Send + Sync {
    /// Whether `date` is a holiday
    fn is_holiday(&self, date: NaiveDate) -> bool;

    /// Name identifying the calendar and its version
    fn name(&self) -> String;
}

/// An explicit set of holiday dates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedCalendar {
    name: String,
    dates: BTreeSet<NaiveDate>,
}

impl FixedCalendar {
    /// Create a calendar from a name and its dates
    pub fn new<I>(name: impl Into<String>, dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        Self {
            name: name.into(),
            dates: dates.into_iter().collect(),
        }
    }

    /// Number of holidays in the calendar
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the calendar has no holidays
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl HolidayCalendar for FixedCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}
