//! Validated, immutable store configuration
//!
//! [`StoreSettings::build`] checks every invariant in one pass and produces a
//! [`StoreConfig`]. Nothing downstream re-validates, and nothing mutates the
//! configuration once built.

use super::{
    weekday_name, CalendarKind, ConfigValidationError, OutputFormat, StoreSettings, WeekdayTraffic,
};
use crate::store::{
    DwellTimeRange, HolidayModifiers, RushWindow, SeniorDiscountWindow, SunnyModifier, TimeWindow,
};
use chrono::{NaiveDate, NaiveTime, Weekday};

/// Validated store parameters
#[derive(Debug, Clone)]
pub struct StoreConfig {
    start_date: NaiveDate,
    end_date: NaiveDate,
    operating_hours: TimeWindow,
    weekday_traffic: WeekdayTraffic,
    lunch: RushWindow,
    dinner: RushWindow,
    senior: SeniorDiscountWindow,
    holiday_modifiers: HolidayModifiers,
    sunny: SunnyModifier,
    dwell: DwellTimeRange,
    percent_senior: f64,
    holiday_calendar: CalendarKind,
    extra_holidays: Vec<NaiveDate>,
    seed: Option<u64>,
    output_format: OutputFormat,
    output_path: Option<String>,
    parallel: bool,
    settings: StoreSettings,
}

impl StoreSettings {
    /// Validate the settings and build an immutable [`StoreConfig`]
    pub fn build(&self) -> Result<StoreConfig, ConfigValidationError> {
        let start_date = parse_date("start_date", &self.start_date)?;
        let end_date = parse_date("end_date", &self.end_date)?;
        if start_date >= end_date {
            return Err(ConfigValidationError::InvalidDateRange {
                start: self.start_date.clone(),
                end: self.end_date.clone(),
            });
        }

        let operating_hours = TimeWindow::new(
            "operating_hours",
            parse_time("open_time", &self.open_time)?,
            parse_time("close_time", &self.close_time)?,
        )?;

        let lunch = RushWindow::new(
            "lunch",
            rush_window("lunch", &self.lunch.start, &self.lunch.end, &operating_hours)?,
            self.lunch.dwell,
            self.lunch.percent,
        )?;
        let dinner = RushWindow::new(
            "dinner",
            rush_window("dinner", &self.dinner.start, &self.dinner.end, &operating_hours)?,
            self.dinner.dwell,
            self.dinner.percent,
        )?;
        let rush_share = lunch.percent() + dinner.percent();
        if rush_share > 1.0 {
            return Err(ConfigValidationError::InvalidRushShare { sum: rush_share });
        }

        let senior = SeniorDiscountWindow::new(
            parse_weekday("senior.day", &self.senior.day)?,
            rush_window("senior", &self.senior.start, &self.senior.end, &operating_hours)?,
            self.senior.min_dwell,
            self.senior.max_dwell,
            self.senior.percent,
        )?;

        let holiday_modifiers = HolidayModifiers::new(
            self.holiday_percent,
            self.day_before_percent,
            self.week_before_percent,
        )?;

        let sunny = SunnyModifier::new(
            self.sunny_chance_percent,
            self.sunny_traffic_percent,
            self.sunny_dwell,
            self.weekend_dwell,
            self.sunny_count_inflation,
        )?;

        let dwell = DwellTimeRange::new(
            self.min_time_spent,
            self.avg_time_spent,
            self.max_time_spent,
        )?;

        if !(0.0..=1.0).contains(&self.percent_senior) {
            return Err(ConfigValidationError::InvalidPercentage {
                field: "percent_senior".to_string(),
                value: self.percent_senior,
            });
        }

        let extra_holidays = self
            .extra_holidays
            .iter()
            .map(|value| parse_date("extra_holidays", value))
            .collect::<Result<Vec<_>, _>>()?;

        let output_format = self.get_output_format()?;

        Ok(StoreConfig {
            start_date,
            end_date,
            operating_hours,
            weekday_traffic: self.weekday_traffic,
            lunch,
            dinner,
            senior,
            holiday_modifiers,
            sunny,
            dwell,
            percent_senior: self.percent_senior,
            holiday_calendar: self.holiday_calendar,
            extra_holidays,
            seed: self.seed,
            output_format,
            output_path: self.output_path.clone(),
            parallel: self.parallel,
            settings: self.clone(),
        })
    }
}

impl StoreConfig {
    /// First date generated
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last date generated, inclusive
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Every date in `[start_date, end_date]` in calendar order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |date| *date <= self.end_date)
    }

    /// Number of dates in the range
    pub fn day_count(&self) -> usize {
        (self.end_date - self.start_date).num_days() as usize + 1
    }

    /// Opening to closing time
    pub fn operating_hours(&self) -> &TimeWindow {
        &self.operating_hours
    }

    /// Baseline traffic per weekday
    pub fn weekday_traffic(&self) -> &WeekdayTraffic {
        &self.weekday_traffic
    }

    /// Lunch rush
    pub fn lunch(&self) -> &RushWindow {
        &self.lunch
    }

    /// Dinner rush
    pub fn dinner(&self) -> &RushWindow {
        &self.dinner
    }

    /// Senior discount window
    pub fn senior(&self) -> &SeniorDiscountWindow {
        &self.senior
    }

    /// Holiday traffic multipliers
    pub fn holiday_modifiers(&self) -> &HolidayModifiers {
        &self.holiday_modifiers
    }

    /// Weekend and sunny-day rules
    pub fn sunny(&self) -> &SunnyModifier {
        &self.sunny
    }

    /// Store-wide dwell distribution
    pub fn dwell(&self) -> &DwellTimeRange {
        &self.dwell
    }

    /// Share of shoppers flagged as seniors
    pub fn percent_senior(&self) -> f64 {
        self.percent_senior
    }

    /// Holiday calendar to consult
    pub fn holiday_calendar(&self) -> CalendarKind {
        self.holiday_calendar
    }

    /// Store-specific holiday dates
    pub fn extra_holidays(&self) -> &[NaiveDate] {
        &self.extra_holidays
    }

    /// Random seed, if one was configured
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Output format for the dataset
    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    /// Output path; stdout when `None`
    pub fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }

    /// Whether dates may be generated in parallel
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// The raw settings the configuration was built from
    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// One-line description for logs
    pub fn summary(&self) -> String {
        format!(
            "{} to {} ({} days), open {}-{}, senior discount on {}",
            self.start_date,
            self.end_date,
            self.day_count(),
            self.operating_hours.start().format("%H:%M"),
            self.operating_hours.end().format("%H:%M"),
            weekday_name(self.senior.day()),
        )
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ConfigValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ConfigValidationError::InvalidDate {
            field: field.to_string(),
            value: value.to_string(),
        }
    })
}

fn parse_time(field: &str, value: &str) -> Result<NaiveTime, ConfigValidationError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| {
        ConfigValidationError::InvalidTime {
            field: field.to_string(),
            value: value.to_string(),
        }
    })
}

fn parse_weekday(field: &str, value: &str) -> Result<Weekday, ConfigValidationError> {
    value.trim().parse::<Weekday>().map_err(|_| ConfigValidationError::InvalidWeekday {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Parse a window and check it lies within operating hours
fn rush_window(
    field: &str,
    start: &str,
    end: &str,
    operating_hours: &TimeWindow,
) -> Result<TimeWindow, ConfigValidationError> {
    let window = TimeWindow::new(
        field,
        parse_time(&format!("{}.start", field), start)?,
        parse_time(&format!("{}.end", field), end)?,
    )?;

    if !operating_hours.encloses(&window) {
        return Err(ConfigValidationError::WindowOutsideOperatingHours {
            field: field.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            open: operating_hours.start().format("%H:%M").to_string(),
            close: operating_hours.end().format("%H:%M").to_string(),
        });
    }

    Ok(window)
}
