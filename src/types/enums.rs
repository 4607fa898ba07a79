//! Enumeration types for the shopper traffic simulator
//!
//! This module contains the enumerations shared across the simulator: holiday
//! proximity classes, visit buckets, and output formats.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How close a date sits to the next holiday on the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HolidayProximity {
    /// The date itself is a holiday
    OnHoliday,
    /// The following date is a holiday
    DayBefore,
    /// A holiday falls `offset` days ahead (2..=7)
    WithinWeekBefore(u8),
    /// No holiday within the coming week
    Ordinary,
}

impl HolidayProximity {
    /// Number of days until the holiday, if any
    pub fn days_until_holiday(&self) -> Option<u8> {
        match self {
            HolidayProximity::OnHoliday => Some(0),
            HolidayProximity::DayBefore => Some(1),
            HolidayProximity::WithinWeekBefore(offset) => Some(*offset),
            HolidayProximity::Ordinary => None,
        }
    }
}

impl fmt::Display for HolidayProximity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolidayProximity::OnHoliday => write!(f, "On Holiday"),
            HolidayProximity::DayBefore => write!(f, "Day Before Holiday"),
            HolidayProximity::WithinWeekBefore(offset) => {
                write!(f, "{} Days Before Holiday", offset)
            }
            HolidayProximity::Ordinary => write!(f, "Ordinary"),
        }
    }
}

/// The arrival bucket a visit was drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitBucket {
    /// Arrival drawn across the whole operating window
    Overall,
    /// Arrival drawn within the lunch rush
    Lunch,
    /// Arrival drawn within the dinner rush
    Dinner,
}

impl fmt::Display for VisitBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisitBucket::Overall => write!(f, "Overall"),
            VisitBucket::Lunch => write!(f, "Lunch"),
            VisitBucket::Dinner => write!(f, "Dinner"),
        }
    }
}

/// Output formats for the generated dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Comma-separated values with a header row
    Csv,
    /// One JSON object per line
    JsonLines,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::JsonLines => write!(f, "jsonl"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "jsonl" | "json" | "ndjson" => Ok(OutputFormat::JsonLines),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Full English name of a weekday, as written to the `DayOfWeek` column
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Whether the weekday falls on a weekend
pub fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}
