//! Statistics collection and reporting
//!
//! This module contains the counters gathered while a dataset is assembled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::events::Visit;
use crate::simulation::Day;
use crate::types::{HolidayProximity, VisitBucket};

/// Counters for one generation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationStatistics {
    // Day statistics
    /// Number of dates generated
    pub days_generated: usize,
    /// Saturdays and Sundays
    pub weekend_days: usize,
    /// Weekend days drawn as sunny
    pub sunny_days: usize,
    /// Dates that were holidays
    pub holiday_days: usize,
    /// Dates directly before a holiday
    pub day_before_holiday_days: usize,
    /// Dates 2-7 days before a holiday
    pub week_before_holiday_days: usize,

    // Visit statistics
    /// Total visits generated
    pub total_visits: usize,
    /// Visits drawn across the whole operating window
    pub overall_visits: usize,
    /// Visits drawn from the lunch rush
    pub lunch_visits: usize,
    /// Visits drawn from the dinner rush
    pub dinner_visits: usize,
    /// Visits moved into the senior discount window
    pub senior_window_visits: usize,
    /// Visits flagged as senior
    pub senior_flagged_visits: usize,
    /// Visits on sunny weekend days
    pub sunny_visits: usize,
    /// Sum of all dwell times in minutes
    pub total_dwell_minutes: u64,

    /// Wall-clock duration of the run
    pub generation_duration: Duration,
}

impl GenerationStatistics {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one generated day and its visits
    pub fn record_day(&mut self, day: &Day, visits: &[Visit]) {
        self.days_generated += 1;
        if day.is_weekend {
            self.weekend_days += 1;
        }
        if day.is_sunny {
            self.sunny_days += 1;
        }
        match day.proximity {
            HolidayProximity::OnHoliday => self.holiday_days += 1,
            HolidayProximity::DayBefore => self.day_before_holiday_days += 1,
            HolidayProximity::WithinWeekBefore(_) => self.week_before_holiday_days += 1,
            HolidayProximity::Ordinary => {}
        }

        for visit in visits {
            self.total_visits += 1;
            match visit.bucket {
                VisitBucket::Overall => self.overall_visits += 1,
                VisitBucket::Lunch => self.lunch_visits += 1,
                VisitBucket::Dinner => self.dinner_visits += 1,
            }
            if visit.senior_window {
                self.senior_window_visits += 1;
            }
            if visit.is_senior {
                self.senior_flagged_visits += 1;
            }
            if visit.is_sunny {
                self.sunny_visits += 1;
            }
            self.total_dwell_minutes += visit.time_spent as u64;
        }
    }

    /// Set the run duration
    pub fn set_generation_duration(&mut self, duration: Duration) {
        self.generation_duration = duration;
    }

    /// Average visits per generated day
    pub fn daily_average(&self) -> f64 {
        if self.days_generated == 0 {
            0.0
        } else {
            self.total_visits as f64 / self.days_generated as f64
        }
    }

    /// Average dwell time in minutes
    pub fn average_dwell(&self) -> f64 {
        if self.total_visits == 0 {
            0.0
        } else {
            self.total_dwell_minutes as f64 / self.total_visits as f64
        }
    }

    /// Percentage of visits flagged as senior
    pub fn senior_percentage(&self) -> f64 {
        self.percentage_of_visits(self.senior_flagged_visits)
    }

    /// Percentage of visits moved into the senior discount window
    pub fn senior_window_percentage(&self) -> f64 {
        self.percentage_of_visits(self.senior_window_visits)
    }

    fn percentage_of_visits(&self, count: usize) -> f64 {
        if self.total_visits == 0 {
            0.0
        } else {
            (count as f64 / self.total_visits as f64) * 100.0
        }
    }

    /// Compact one-line summary suitable for logging
    pub fn compact_summary(&self) -> String {
        format!(
            "Generation: {} days, {} visits ({} overall, {} lunch, {} dinner), \
             {} senior-window, {} holidays",
            self.days_generated,
            self.total_visits,
            self.overall_visits,
            self.lunch_visits,
            self.dinner_visits,
            self.senior_window_visits,
            self.holiday_days,
        )
    }

    /// Multi-line report printed after a run
    pub fn summary(&self) -> String {
        let mut output = String::new();

        output.push_str("Shopper Traffic Generation Complete!\n");
        output.push_str("====================================\n\n");

        output.push_str("Days:\n");
        output.push_str(&format!("   Days Generated: {}\n", self.days_generated));
        output.push_str(&format!(
            "   Weekend Days: {} ({} sunny)\n",
            self.weekend_days, self.sunny_days
        ));
        output.push_str(&format!(
            "   Holidays: {} on the day, {} day before, {} within the week before\n",
            self.holiday_days, self.day_before_holiday_days, self.week_before_holiday_days
        ));
        output.push_str(&format!(
            "   Duration: {:.2} seconds\n\n",
            self.generation_duration.as_secs_f64()
        ));

        output.push_str("Visits:\n");
        output.push_str(&format!("   Total Visits: {}\n", self.total_visits));
        if self.days_generated > 0 {
            output.push_str(&format!("   Daily Average: {:.1} visits/day\n", self.daily_average()));
        }
        output.push_str(&format!(
            "   Buckets: {} overall, {} lunch, {} dinner\n",
            self.overall_visits, self.lunch_visits, self.dinner_visits
        ));
        output.push_str(&format!(
            "   Senior Window: {} ({:.1}%)\n",
            self.senior_window_visits,
            self.senior_window_percentage()
        ));
        output.push_str(&format!(
            "   Senior Shoppers: {} ({:.1}%)\n",
            self.senior_flagged_visits,
            self.senior_percentage()
        ));
        output.push_str(&format!("   Sunny Visits: {}\n", self.sunny_visits));
        output.push_str(&format!("   Average Dwell: {:.1} minutes\n\n", self.average_dwell()));

        output.push_str("Summary: ");
        output.push_str(&self.compact_summary());
        output.push('\n');

        output
    }
}

impl fmt::Display for GenerationStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.compact_summary())
    }
}
