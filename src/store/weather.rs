//! Weekend and sunny-day effects

use super::round_count;
use crate::types::{is_weekend, ConfigValidationError};
use chrono::{Datelike, NaiveDate};
use rand::Rng;

/// Weekend and weather flags of a date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekendOutlook {
    /// Saturday or Sunday
    pub is_weekend: bool,
    /// Weekend date drawn as sunny; never true on weekdays
    pub is_sunny: bool,
}

/// Sunny and ordinary weekend rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunnyModifier {
    chance: f64,
    traffic_percent: f64,
    sunny_dwell: u32,
    weekend_dwell: u32,
    count_inflation: bool,
}

impl SunnyModifier {
    /// Create the modifier; both probabilities must lie in 0.0-1.0
    pub fn new(
        chance: f64,
        traffic_percent: f64,
        sunny_dwell: u32,
        weekend_dwell: u32,
        count_inflation: bool,
    ) -> Result<Self, ConfigValidationError> {
        for (field, value) in [
            ("sunny_chance_percent", chance),
            ("sunny_traffic_percent", traffic_percent),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::InvalidPercentage {
                    field: field.to_string(),
                    value,
                });
            }
        }

        Ok(Self {
            chance,
            traffic_percent,
            sunny_dwell,
            weekend_dwell,
            count_inflation,
        })
    }

    /// Chance that a weekend date is sunny
    pub fn chance(&self) -> f64 {
        self.chance
    }

    /// Share of sunny weekend shoppers taking the sunny dwell
    pub fn traffic_percent(&self) -> f64 {
        self.traffic_percent
    }

    /// Dwell minutes on a sunny weekend
    pub fn sunny_dwell(&self) -> u32 {
        self.sunny_dwell
    }

    /// Dwell minutes on an ordinary weekend
    pub fn weekend_dwell(&self) -> u32 {
        self.weekend_dwell
    }

    /// Whether sunny weekends inflate the visitor count
    pub fn count_inflation(&self) -> bool {
        self.count_inflation
    }

    /// Flag `date` as weekend and, for weekends only, draw whether it is sunny
    pub fn evaluate<R: Rng + ?Sized>(&self, date: NaiveDate, rng: &mut R) -> WeekendOutlook {
        let is_weekend = is_weekend(date.weekday());
        let is_sunny = is_weekend && rng.gen_bool(self.chance);
        WeekendOutlook { is_weekend, is_sunny }
    }

    /// Dwell for a weekend visit
    ///
    /// On a sunny day a shopper takes the sunny dwell with probability
    /// `traffic_percent`; everyone else takes the ordinary weekend dwell.
    pub fn sample_weekend_dwell<R: Rng + ?Sized>(&self, is_sunny: bool, rng: &mut R) -> u32 {
        if is_sunny && rng.gen_bool(self.traffic_percent) {
            self.sunny_dwell
        } else {
            self.weekend_dwell
        }
    }

    /// Visitor count after the opt-in sunny inflation policy
    pub fn adjust_count(&self, count: u32, outlook: WeekendOutlook) -> u32 {
        if self.count_inflation && outlook.is_sunny {
            round_count(count as f64 * (1.0 + self.traffic_percent))
        } else {
            count
        }
    }
}
