//! Rush windows: time intervals that pull a share of shoppers in
//!
//! The same [`RushWindow`] models the lunch rush, the dinner rush and, wrapped
//! in a [`SeniorDiscountWindow`], the weekly senior-discount hours.

use super::round_count;
use crate::types::ConfigValidationError;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Dwell time rule of a rush window, in minutes
///
/// Serialized either as a bare integer (`10`) or as `{ "min": 8, "max": 14 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DwellTarget {
    /// Every shopper stays exactly this long
    Fixed(u32),
    /// Uniform integer draw within the inclusive range
    Range {
        /// Lower bound
        min: u32,
        /// Upper bound
        max: u32,
    },
}

impl DwellTarget {
    /// Inclusive bounds of the rule
    pub fn bounds(&self) -> (u32, u32) {
        match *self {
            DwellTarget::Fixed(minutes) => (minutes, minutes),
            DwellTarget::Range { min, max } => (min, max),
        }
    }

    /// Draw a dwell time
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        match *self {
            DwellTarget::Fixed(minutes) => minutes,
            DwellTarget::Range { min, max } => rng.gen_range(min..=max),
        }
    }

    fn validate(&self, field: &str) -> Result<(), ConfigValidationError> {
        let (min, max) = self.bounds();
        if min > max {
            return Err(ConfigValidationError::InvalidDwellRange {
                field: field.to_string(),
                min,
                avg: min,
                max,
            });
        }
        Ok(())
    }
}

/// Half-open time-of-day interval `[start, end)` with `start < end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    /// Create a window, rejecting empty or inverted intervals
    pub fn new(
        field: &str,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self, ConfigValidationError> {
        if start >= end {
            return Err(ConfigValidationError::InvalidTimeRange {
                field: field.to_string(),
                start: start.format("%H:%M").to_string(),
                end: end.format("%H:%M").to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Window start
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// Window end (exclusive)
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Length of the window in seconds
    pub fn duration_seconds(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_seconds()
    }

    /// Whether `time` falls within `[start, end)`
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether `other` lies entirely inside this window
    pub fn encloses(&self, other: &TimeWindow) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Uniform arrival on `date` within `[start, end)` at second resolution
    pub fn sample_arrival<R: Rng + ?Sized>(&self, date: NaiveDate, rng: &mut R) -> NaiveDateTime {
        let offset = rng.gen_range(0..self.duration_seconds());
        date.and_time(self.start) + Duration::seconds(offset)
    }
}

/// A time window with a dwell rule and an activation percentage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RushWindow {
    window: TimeWindow,
    dwell: DwellTarget,
    percent: f64,
}

impl RushWindow {
    /// Create a rush window
    pub fn new(
        field: &str,
        window: TimeWindow,
        dwell: DwellTarget,
        percent: f64,
    ) -> Result<Self, ConfigValidationError> {
        dwell.validate(field)?;
        if !(0.0..=1.0).contains(&percent) {
            return Err(ConfigValidationError::InvalidPercentage {
                field: format!("{}.percent", field),
                value: percent,
            });
        }
        Ok(Self { window, dwell, percent })
    }

    /// The window's time interval
    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// The window's dwell rule
    pub fn dwell(&self) -> DwellTarget {
        self.dwell
    }

    /// Activation percentage
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Split `total` into `(rush_count, remainder_count)`
    ///
    /// `rush_count` is `total * percent` rounded half to even.
    pub fn split(&self, total: u32) -> (u32, u32) {
        let rush_count = round_count(total as f64 * self.percent).min(total);
        (rush_count, total - rush_count)
    }

    /// Draw a dwell time for a shopper in this window
    pub fn sample_dwell<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        self.dwell.sample(rng)
    }

    /// Draw an arrival on `date` within this window
    pub fn sample_arrival<R: Rng + ?Sized>(&self, date: NaiveDate, rng: &mut R) -> NaiveDateTime {
        self.window.sample_arrival(date, rng)
    }

    /// Whether `time` falls inside the window
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.window.contains(time)
    }
}

/// The weekly senior-discount hours
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeniorDiscountWindow {
    day: Weekday,
    rush: RushWindow,
}

impl SeniorDiscountWindow {
    /// Create the senior window; dwell is a uniform draw in `[min_dwell, max_dwell]`
    pub fn new(
        day: Weekday,
        window: TimeWindow,
        min_dwell: u32,
        max_dwell: u32,
        percent: f64,
    ) -> Result<Self, ConfigValidationError> {
        let dwell = DwellTarget::Range { min: min_dwell, max: max_dwell };
        let rush = RushWindow::new("senior", window, dwell, percent)?;
        Ok(Self { day, rush })
    }

    /// Weekday the discount runs on
    pub fn day(&self) -> Weekday {
        self.day
    }

    /// Whether the discount runs on `weekday`
    pub fn applies_on(&self, weekday: Weekday) -> bool {
        self.day == weekday
    }

    /// The underlying rush window
    pub fn rush(&self) -> &RushWindow {
        &self.rush
    }

    /// Probability that an eligible shopper is pulled into the window
    pub fn percent(&self) -> f64 {
        self.rush.percent()
    }

    /// Whether an arrival already sits in the window
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.rush.contains(time)
    }

    /// Draw an arrival on `date` within the window
    pub fn sample_arrival<R: Rng + ?Sized>(&self, date: NaiveDate, rng: &mut R) -> NaiveDateTime {
        self.rush.sample_arrival(date, rng)
    }

    /// Draw a dwell time in `[min_dwell, max_dwell]`
    pub fn sample_dwell<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        self.rush.sample_dwell(rng)
    }
}
