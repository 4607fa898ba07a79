//! Daily visitor counts from weekday baselines and holiday effects

use super::round_count;
use crate::calendar::HolidayOracle;
use crate::types::{ConfigValidationError, HolidayProximity, StoreConfig};
use chrono::{Datelike, NaiveDate};
use tracing::{debug, instrument};

/// Traffic multipliers applied around holidays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HolidayModifiers {
    holiday_percent: f64,
    day_before_percent: f64,
    week_before_percent: f64,
}

impl HolidayModifiers {
    /// Create the modifiers; each value must be finite and non-negative
    pub fn new(
        holiday_percent: f64,
        day_before_percent: f64,
        week_before_percent: f64,
    ) -> Result<Self, ConfigValidationError> {
        for (field, value) in [
            ("holiday_percent", holiday_percent),
            ("day_before_percent", day_before_percent),
            ("week_before_percent", week_before_percent),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigValidationError::NegativeValue {
                    field: field.to_string(),
                    value,
                });
            }
        }

        Ok(Self {
            holiday_percent,
            day_before_percent,
            week_before_percent,
        })
    }

    /// Multiplier on the holiday itself
    pub fn holiday_percent(&self) -> f64 {
        self.holiday_percent
    }

    /// Increase on the day before a holiday
    pub fn day_before_percent(&self) -> f64 {
        self.day_before_percent
    }

    /// Increase 2-7 days before a holiday
    pub fn week_before_percent(&self) -> f64 {
        self.week_before_percent
    }

    /// Factor applied to the baseline for a classification
    pub fn multiplier(&self, proximity: HolidayProximity) -> f64 {
        match proximity {
            HolidayProximity::OnHoliday => self.holiday_percent,
            HolidayProximity::DayBefore => 1.0 + self.day_before_percent,
            HolidayProximity::WithinWeekBefore(_) => 1.0 + self.week_before_percent,
            HolidayProximity::Ordinary => 1.0,
        }
    }
}

/// Result of resolving one date's traffic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTraffic {
    /// The date resolved
    pub date: NaiveDate,
    /// Weekday baseline before holiday effects
    pub baseline: u32,
    /// Holiday classification of the date
    pub proximity: HolidayProximity,
    /// Expected visitor count
    pub count: u32,
}

/// Computes expected visitor counts
#[derive(Debug, Clone)]
pub struct TrafficResolver {
    oracle: HolidayOracle,
}

impl TrafficResolver {
    /// Create a resolver backed by `oracle`
    pub fn new(oracle: HolidayOracle) -> Self {
        Self { oracle }
    }

    /// The injected holiday oracle
    pub fn oracle(&self) -> &HolidayOracle {
        &self.oracle
    }

    /// Expected visitor count for `date`
    pub fn resolve(&self, date: NaiveDate, config: &StoreConfig) -> u32 {
        self.resolve_detailed(date, config).count
    }

    /// Expected visitor count for `date` with the inputs that produced it
    ///
    /// Exactly one holiday classification is applied and the product is
    /// rounded half to even.
    #[instrument(skip(self, config), level = "debug")]
    pub fn resolve_detailed(&self, date: NaiveDate, config: &StoreConfig) -> ResolvedTraffic {
        let baseline = config.weekday_traffic().for_weekday(date.weekday());
        let proximity = self.oracle.classify(date);
        let count = round_count(baseline as f64 * config.holiday_modifiers().multiplier(proximity));

        debug!(
            baseline = baseline,
            proximity = %proximity,
            count = count,
            "Resolved daily traffic"
        );

        ResolvedTraffic {
            date,
            baseline,
            proximity,
            count,
        }
    }
}
