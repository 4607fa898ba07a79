//! Visits and exported visit records
//!
//! A [`Visit`] is what the day generator produces: one shopper's arrival, dwell
//! and flags. Once the assembler has sorted every visit in the run it stamps a
//! [`ShopperId`] on each one, producing the exported [`VisitRecord`].

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::types::{weekday_name, ShopperId, VisitBucket};

/// One generated visit, before identifiers are assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    /// Date of the visit
    pub date: NaiveDate,
    /// Weekday of `date`
    pub day_of_week: Weekday,
    /// Arrival timestamp on `date`
    pub time_in: NaiveDateTime,
    /// Dwell time in minutes
    pub time_spent: u32,
    /// Shopper flagged as a senior
    pub is_senior: bool,
    /// Visit on a sunny weekend day
    pub is_sunny: bool,
    /// Bucket the arrival was first drawn from
    pub bucket: VisitBucket,
    /// Arrival was moved into the senior discount window
    pub senior_window: bool,
}

impl Visit {
    /// Sort key used by the assembler
    pub fn sort_key(&self) -> (NaiveDate, NaiveDateTime) {
        (self.date, self.time_in)
    }
}

/// Exported visit record
///
/// Field names and order are the dataset contract consumed by downstream
/// loaders: `Date, DayOfWeek, TimeIn, TimeSpent, IsSenior, IsSunny, ShopperId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VisitRecord {
    /// Date of the visit
    pub date: NaiveDate,
    /// Full weekday name, e.g. "Tuesday"
    pub day_of_week: String,
    /// Arrival timestamp
    pub time_in: NaiveDateTime,
    /// Dwell time in minutes
    pub time_spent: u32,
    /// Shopper flagged as a senior
    pub is_senior: bool,
    /// Visit on a sunny weekend day
    pub is_sunny: bool,
    /// Sequential identifier in `(date, time_in)` order
    pub shopper_id: ShopperId,
}

impl VisitRecord {
    /// Stamp `shopper_id` on a visit
    pub fn from_visit(visit: &Visit, shopper_id: ShopperId) -> Self {
        Self {
            date: visit.date,
            day_of_week: weekday_name(visit.day_of_week).to_string(),
            time_in: visit.time_in,
            time_spent: visit.time_spent,
            is_senior: visit.is_senior,
            is_sunny: visit.is_sunny,
            shopper_id,
        }
    }

    /// Column names in export order
    pub fn field_names() -> [&'static str; 7] {
        ["Date", "DayOfWeek", "TimeIn", "TimeSpent", "IsSenior", "IsSunny", "ShopperId"]
    }
}
