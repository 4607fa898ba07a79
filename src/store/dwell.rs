//! Baseline dwell time distribution

use crate::types::ConfigValidationError;
use rand::Rng;
use rand_distr::{Distribution, Triangular};

/// Store-wide dwell time bounds, in minutes
///
/// Draws follow a triangular distribution peaking at `avg`, rounded to whole
/// minutes and clipped to `[min, max]`.
#[derive(Debug, Clone, Copy)]
pub struct DwellTimeRange {
    min: u32,
    avg: u32,
    max: u32,
    // None when min == max, which Triangular rejects
    distribution: Option<Triangular<f64>>,
}

impl DwellTimeRange {
    /// Create the range, requiring `min <= avg <= max`
    pub fn new(min: u32, avg: u32, max: u32) -> Result<Self, ConfigValidationError> {
        if !(min <= avg && avg <= max) {
            return Err(ConfigValidationError::InvalidDwellRange {
                field: "time_spent".to_string(),
                min,
                avg,
                max,
            });
        }

        let distribution = Triangular::new(min as f64, max as f64, avg as f64).ok();
        Ok(Self { min, avg, max, distribution })
    }

    /// Lower bound
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Peak of the distribution
    pub fn avg(&self) -> u32 {
        self.avg
    }

    /// Upper bound
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Whether `minutes` lies within the bounds
    pub fn contains(&self, minutes: u32) -> bool {
        (self.min..=self.max).contains(&minutes)
    }

    /// Draw a dwell time
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        match &self.distribution {
            Some(distribution) => {
                let drawn = distribution.sample(rng).round();
                (drawn as u32).clamp(self.min, self.max)
            }
            None => self.min,
        }
    }
}
