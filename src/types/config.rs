//! Configuration structures for the shopper traffic simulator
//!
//! This module contains the raw store settings, the command line surface, file
//! loading, and the validation errors raised when settings are turned into a
//! [`StoreConfig`](super::StoreConfig).

use super::OutputFormat;
use crate::store::DwellTarget;
use chrono::Weekday;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "shopper-traffic-simulator",
    version = "0.1.0",
    about = "Shopper Traffic Simulator - Generates synthetic per-visitor store logs",
    long_about = "Generates a plausible per-visitor event log for a fictitious retail store over a date range, driven by operating hours, weekday traffic, holiday effects, lunch and dinner rushes, a weekly senior-discount window and weekend weather.

EXAMPLES:
    # Generate a year of visits with default settings
    shopper-traffic-simulator --output shoppers.csv

    # Use a configuration file
    shopper-traffic-simulator --config store.json

    # Override specific settings
    shopper-traffic-simulator --start-date 2021-01-01 --end-date 2021-03-31 --mon-traffic 650

    # Generate configuration template
    shopper-traffic-simulator --print-config > store.json

    # Validate configuration without generating
    shopper-traffic-simulator --config store.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. Missing fields fall back to defaults and CLI arguments override file settings."
    )]
    pub config: Option<String>,

    /// First date to generate (YYYY-MM-DD)
    #[arg(long, help = "The starting date to generate data for, e.g. 2020-01-01")]
    pub start_date: Option<String>,

    /// Last date to generate (YYYY-MM-DD)
    #[arg(long, help = "The ending date to generate data for, e.g. 2020-12-31")]
    pub end_date: Option<String>,

    /// Store opening time (HH:MM)
    #[arg(long, help = "The opening time of the store, e.g. 06:00")]
    pub open_time: Option<String>,

    /// Store closing time (HH:MM)
    #[arg(long, help = "The closing time of the store, e.g. 21:00")]
    pub close_time: Option<String>,

    /// Average shoppers on Monday
    #[arg(long, help = "Average number of shoppers on Monday")]
    pub mon_traffic: Option<u32>,

    /// Average shoppers on Tuesday
    #[arg(long, help = "Average number of shoppers on Tuesday")]
    pub tue_traffic: Option<u32>,

    /// Average shoppers on Wednesday
    #[arg(long, help = "Average number of shoppers on Wednesday")]
    pub wed_traffic: Option<u32>,

    /// Average shoppers on Thursday
    #[arg(long, help = "Average number of shoppers on Thursday")]
    pub thu_traffic: Option<u32>,

    /// Average shoppers on Friday
    #[arg(long, help = "Average number of shoppers on Friday")]
    pub fri_traffic: Option<u32>,

    /// Average shoppers on Saturday
    #[arg(long, help = "Average number of shoppers on Saturday")]
    pub sat_traffic: Option<u32>,

    /// Average shoppers on Sunday
    #[arg(long, help = "Average number of shoppers on Sunday")]
    pub sun_traffic: Option<u32>,

    /// Lunch rush start (HH:MM)
    #[arg(long, help = "The time the lunch rush starts, e.g. 12:00")]
    pub lunch_start: Option<String>,

    /// Lunch rush end (HH:MM)
    #[arg(long, help = "The time the lunch rush ends, e.g. 13:00")]
    pub lunch_end: Option<String>,

    /// Minutes spent by lunch rush shoppers
    #[arg(long, help = "Minutes lunch rush shoppers spend in the store")]
    pub lunch_time_spent: Option<u32>,

    /// Share of daily shoppers arriving in the lunch rush (0.0-1.0)
    #[arg(long, help = "Share of shoppers arriving at lunchtime (0.0-1.0)")]
    pub lunch_percent: Option<f64>,

    /// Dinner rush start (HH:MM)
    #[arg(long, help = "The time the dinner rush starts, e.g. 17:00")]
    pub dinner_start: Option<String>,

    /// Dinner rush end (HH:MM)
    #[arg(long, help = "The time the dinner rush ends, e.g. 18:30")]
    pub dinner_end: Option<String>,

    /// Minutes spent by dinner rush shoppers
    #[arg(long, help = "Minutes dinner rush shoppers spend in the store")]
    pub dinner_time_spent: Option<u32>,

    /// Share of daily shoppers arriving in the dinner rush (0.0-1.0)
    #[arg(long, help = "Share of shoppers arriving at dinnertime (0.0-1.0)")]
    pub dinner_percent: Option<f64>,

    /// Senior discount start (HH:MM)
    #[arg(long, help = "The time the senior discount starts, e.g. 10:00")]
    pub senior_start: Option<String>,

    /// Senior discount end (HH:MM)
    #[arg(long, help = "The time the senior discount ends, e.g. 12:00")]
    pub senior_end: Option<String>,

    /// Probability a shopper is pulled into the senior discount window (0.0-1.0)
    #[arg(long, help = "Share of senior-day shoppers pulled into the discount window (0.0-1.0)")]
    pub senior_discount_percent: Option<f64>,

    /// Minimum minutes spent during senior discount hours
    #[arg(long, help = "Minimum minutes shoppers spend during senior discount hours")]
    pub senior_min_time_spent: Option<u32>,

    /// Maximum minutes spent during senior discount hours
    #[arg(long, help = "Maximum minutes shoppers spend during senior discount hours")]
    pub senior_max_time_spent: Option<u32>,

    /// Weekday of the senior discount
    #[arg(long, help = "Weekday of the senior discount, e.g. Tuesday")]
    pub senior_day: Option<String>,

    /// Share of shoppers flagged as seniors (0.0-1.0)
    #[arg(long, help = "Share of shoppers who are seniors (0.0-1.0)")]
    pub senior_percent: Option<f64>,

    /// Minimum minutes a shopper spends in the store
    #[arg(long, help = "Minimum minutes shoppers spend in the store")]
    pub min_time_spent: Option<u32>,

    /// Average minutes a shopper spends in the store
    #[arg(long, help = "Average minutes shoppers spend in the store")]
    pub avg_time_spent: Option<u32>,

    /// Maximum minutes a shopper spends in the store
    #[arg(long, help = "Maximum minutes shoppers spend in the store")]
    pub max_time_spent: Option<u32>,

    /// Traffic multiplier applied on a holiday
    #[arg(long, help = "Multiplier applied to traffic on a holiday, e.g. 0.2")]
    pub holiday_percent: Option<f64>,

    /// Traffic increase the day before a holiday
    #[arg(long, help = "Traffic increase the day before a holiday, e.g. 0.4")]
    pub day_before_holiday_percent: Option<f64>,

    /// Traffic increase within the week before a holiday
    #[arg(long, help = "Traffic increase within a week before a holiday, e.g. 0.15")]
    pub week_before_holiday_percent: Option<f64>,

    /// Share of sunny weekend shoppers taking the sunny dwell time (0.0-1.0)
    #[arg(long, help = "Sunny weekend traffic share (0.0-1.0)")]
    pub sunny_traffic_percent: Option<f64>,

    /// Chance that a weekend day is sunny (0.0-1.0)
    #[arg(long, help = "Chance that a weekend day is sunny (0.0-1.0)")]
    pub sunny_chance_percent: Option<f64>,

    /// Minutes spent on a sunny weekend
    #[arg(long, help = "Minutes shoppers spend in the store on a sunny weekend")]
    pub sunny_time_spent: Option<u32>,

    /// Minutes spent on an ordinary weekend
    #[arg(long, help = "Minutes shoppers spend in the store on an ordinary weekend")]
    pub weekend_time_spent: Option<u32>,

    /// Inflate sunny weekend traffic by the sunny traffic percent
    #[arg(long, help = "Increase the visitor count on sunny weekends")]
    pub sunny_count_inflation: bool,

    /// Holiday calendar to classify dates against
    #[arg(long, help = "Holiday calendar (us-federal or custom)")]
    pub holiday_calendar: Option<String>,

    /// Additional holiday dates (YYYY-MM-DD), may be repeated
    #[arg(long = "extra-holiday", help = "Additional holiday date, may be repeated")]
    pub extra_holidays: Vec<String>,

    /// Output format for generated visits
    #[arg(
        long,
        help = "Output format (csv or jsonl)",
        long_help = "Output format for generated visits. Supported formats: csv, jsonl. \
                     Default: csv"
    )]
    pub output_format: Option<String>,

    /// Output file path (stdout when omitted)
    #[arg(short, long, help = "Output file path (stdout when omitted)")]
    pub output: Option<String>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Generate dates one after another instead of in parallel
    #[arg(long, help = "Generate dates sequentially on one thread")]
    pub sequential: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without generating
    #[arg(long, help = "Validate configuration without generating visits")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Baseline shopper traffic for each weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekdayTraffic {
    /// Average shoppers on Monday
    pub monday: u32,
    /// Average shoppers on Tuesday
    pub tuesday: u32,
    /// Average shoppers on Wednesday
    pub wednesday: u32,
    /// Average shoppers on Thursday
    pub thursday: u32,
    /// Average shoppers on Friday
    pub friday: u32,
    /// Average shoppers on Saturday
    pub saturday: u32,
    /// Average shoppers on Sunday
    pub sunday: u32,
}

impl Default for WeekdayTraffic {
    fn default() -> Self {
        Self {
            monday: 800,
            tuesday: 1000,
            wednesday: 1200,
            thursday: 900,
            friday: 2500,
            saturday: 4000,
            sunday: 5000,
        }
    }
}

impl WeekdayTraffic {
    /// Baseline traffic for a weekday
    pub fn for_weekday(&self, weekday: Weekday) -> u32 {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    /// Sum of all seven baselines
    pub fn weekly_total(&self) -> u64 {
        [
            self.monday,
            self.tuesday,
            self.wednesday,
            self.thursday,
            self.friday,
            self.saturday,
            self.sunday,
        ]
        .iter()
        .map(|&count| count as u64)
        .sum()
    }
}

/// Settings for a lunch or dinner rush
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RushSettings {
    /// Rush start (HH:MM)
    pub start: String,
    /// Rush end (HH:MM)
    pub end: String,
    /// Minutes spent by rush shoppers, fixed or `{ "min": .., "max": .. }`
    pub dwell: DwellTarget,
    /// Share of daily shoppers arriving in the rush (0.0-1.0)
    pub percent: f64,
}

impl RushSettings {
    /// Default lunch rush: 12:00-13:00, 10 minutes, 10% of shoppers
    pub fn lunch() -> Self {
        Self {
            start: "12:00".to_string(),
            end: "13:00".to_string(),
            dwell: DwellTarget::Fixed(10),
            percent: 0.10,
        }
    }

    /// Default dinner rush: 17:00-18:30, 10 minutes, 15% of shoppers
    pub fn dinner() -> Self {
        Self {
            start: "17:00".to_string(),
            end: "18:30".to_string(),
            dwell: DwellTarget::Fixed(10),
            percent: 0.15,
        }
    }
}

/// Settings for the weekly senior discount window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeniorSettings {
    /// Window start (HH:MM)
    pub start: String,
    /// Window end (HH:MM)
    pub end: String,
    /// Minimum minutes spent in the window
    pub min_dwell: u32,
    /// Maximum minutes spent in the window
    pub max_dwell: u32,
    /// Probability a shopper is pulled into the window (0.0-1.0)
    pub percent: f64,
    /// Weekday the discount runs on
    pub day: String,
}

impl Default for SeniorSettings {
    fn default() -> Self {
        Self {
            start: "10:00".to_string(),
            end: "12:00".to_string(),
            min_dwell: 45,
            max_dwell: 60,
            percent: 0.1,
            day: "Tuesday".to_string(),
        }
    }
}

/// Which holiday calendar the oracle consults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalendarKind {
    /// US federal holidays plus any extra dates
    UsFederal,
    /// Only the extra dates listed in the settings
    Custom,
}

impl std::str::FromStr for CalendarKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "us-federal" | "us_federal" | "us" => Ok(CalendarKind::UsFederal),
            "custom" | "none" => Ok(CalendarKind::Custom),
            _ => Err(format!("Unknown holiday calendar: {}", s)),
        }
    }
}

/// Raw store settings as supplied by the user
///
/// Every field has a default, so a configuration file only needs to name the
/// fields it changes. Call [`StoreSettings::build`] to validate the settings
/// and obtain an immutable [`StoreConfig`](super::StoreConfig).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// First date to generate (YYYY-MM-DD)
    pub start_date: String,
    /// Last date to generate, inclusive (YYYY-MM-DD)
    pub end_date: String,
    /// Store opening time (HH:MM)
    pub open_time: String,
    /// Store closing time (HH:MM)
    pub close_time: String,
    /// Baseline traffic per weekday
    pub weekday_traffic: WeekdayTraffic,
    /// Lunch rush
    pub lunch: RushSettings,
    /// Dinner rush
    pub dinner: RushSettings,
    /// Senior discount window
    pub senior: SeniorSettings,
    /// Traffic multiplier on a holiday
    pub holiday_percent: f64,
    /// Traffic increase the day before a holiday
    pub day_before_percent: f64,
    /// Traffic increase 2-7 days before a holiday
    pub week_before_percent: f64,
    /// Chance that a weekend day is sunny (0.0-1.0)
    pub sunny_chance_percent: f64,
    /// Share of sunny weekend shoppers taking the sunny dwell (0.0-1.0)
    pub sunny_traffic_percent: f64,
    /// Minutes spent on a sunny weekend
    pub sunny_dwell: u32,
    /// Minutes spent on an ordinary weekend
    pub weekend_dwell: u32,
    /// Inflate sunny weekend counts by `sunny_traffic_percent`
    pub sunny_count_inflation: bool,
    /// Share of shoppers flagged as seniors (0.0-1.0)
    pub percent_senior: f64,
    /// Minimum minutes spent in the store
    pub min_time_spent: u32,
    /// Average minutes spent in the store
    pub avg_time_spent: u32,
    /// Maximum minutes spent in the store
    pub max_time_spent: u32,
    /// Holiday calendar to consult
    pub holiday_calendar: CalendarKind,
    /// Additional holiday dates (YYYY-MM-DD)
    pub extra_holidays: Vec<String>,
    /// Random seed for reproducible results
    pub seed: Option<u64>,
    /// Output format for generated visits
    pub output_format: String,
    /// Output file path (stdout when absent)
    pub output_path: Option<String>,
    /// Generate dates in parallel
    pub parallel: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            start_date: "2020-01-01".to_string(),
            end_date: "2020-12-31".to_string(),
            open_time: "06:00".to_string(),
            close_time: "21:00".to_string(),
            weekday_traffic: WeekdayTraffic::default(),
            lunch: RushSettings::lunch(),
            dinner: RushSettings::dinner(),
            senior: SeniorSettings::default(),
            holiday_percent: 0.2,
            day_before_percent: 0.4,
            week_before_percent: 0.15,
            sunny_chance_percent: 0.3,
            sunny_traffic_percent: 0.4,
            sunny_dwell: 15,
            weekend_dwell: 60,
            sunny_count_inflation: false,
            percent_senior: 0.2,
            min_time_spent: 6,
            avg_time_spent: 25,
            max_time_spent: 75,
            holiday_calendar: CalendarKind::UsFederal,
            extra_holidays: Vec::new(),
            seed: None,
            output_format: "csv".to_string(),
            output_path: None,
            parallel: true,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),

    /// Configuration file holds a value no setting accepts
    #[error("Invalid configuration file: {0}")]
    Invalid(#[from] ConfigValidationError),

    /// A CLI value could not be interpreted
    #[error("Invalid value for --{flag}: {reason}")]
    InvalidArgument {
        /// Name of the offending flag
        flag: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Validation errors raised while building a [`StoreConfig`](super::StoreConfig)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    /// A time string is not in HH:MM form
    #[error("Invalid time for {field}: '{value}' (expected HH:MM, e.g. 21:00)")]
    InvalidTime {
        /// Name of the field with the invalid time
        field: String,
        /// The rejected input
        value: String,
    },

    /// A date string is not in YYYY-MM-DD form
    #[error("Invalid date for {field}: '{value}' (expected YYYY-MM-DD, e.g. 2020-01-01)")]
    InvalidDate {
        /// Name of the field with the invalid date
        field: String,
        /// The rejected input
        value: String,
    },

    /// A time window does not start strictly before it ends
    #[error("Invalid time range for {field}: start ({start}) must be before end ({end})")]
    InvalidTimeRange {
        /// Name of the window
        field: String,
        /// Window start
        start: String,
        /// Window end
        end: String,
    },

    /// The date range does not start strictly before it ends
    #[error("Invalid date range: start date ({start}) must be before end date ({end})")]
    InvalidDateRange {
        /// First date
        start: String,
        /// Last date
        end: String,
    },

    /// A probability is outside 0.0-1.0
    #[error("Invalid percentage for {field}: {value} (must be between 0.0 and 1.0)")]
    InvalidPercentage {
        /// Name of the field with invalid percentage
        field: String,
        /// The invalid percentage value
        value: f64,
    },

    /// A multiplier is negative or not finite
    #[error("Invalid value for {field}: {value} (must be a finite number >= 0)")]
    NegativeValue {
        /// Name of the field
        field: String,
        /// The invalid value
        value: f64,
    },

    /// Dwell bounds are out of order
    #[error(
        "Invalid dwell range for {field}: min ({min}) <= avg ({avg}) <= max ({max}) is required"
    )]
    InvalidDwellRange {
        /// Name of the dwell setting
        field: String,
        /// Lower bound
        min: u32,
        /// Centre (equal to a bound when the range has no centre)
        avg: u32,
        /// Upper bound
        max: u32,
    },

    /// Weekday name not recognised
    #[error("Invalid weekday for {field}: '{value}'")]
    InvalidWeekday {
        /// Name of the field
        field: String,
        /// The rejected input
        value: String,
    },

    /// A rush window extends past the operating hours
    #[error("The {field} window ({start}-{end}) must lie within operating hours ({open}-{close})")]
    WindowOutsideOperatingHours {
        /// Name of the window
        field: String,
        /// Window start
        start: String,
        /// Window end
        end: String,
        /// Store opening time
        open: String,
        /// Store closing time
        close: String,
    },

    /// Lunch and dinner shares exceed the whole day
    #[error("Lunch and dinner percentages sum to {sum} (must not exceed 1.0)")]
    InvalidRushShare {
        /// Combined share
        sum: f64,
    },

    /// Unknown output format
    #[error("Invalid output format: '{0}' (supported: csv, jsonl)")]
    InvalidOutputFormat(String),
}

/// Name used across the crate for settings validation failures
pub type ValidationError = ConfigValidationError;

impl StoreSettings {
    /// Create settings from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        if let Some(config_path) = &args.config {
            settings = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut settings, args)?;

        Ok(settings)
    }

    /// Load settings from a JSON file, merging with defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let value: serde_json::Value = serde_json::from_str(&content)?;
                reject_negative_numbers(&value, "")?;
                Ok(serde_json::from_value(value)?)
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(settings: &mut Self, args: CliArgs) -> Result<(), ConfigError> {
        if let Some(value) = args.start_date {
            settings.start_date = value;
        }
        if let Some(value) = args.end_date {
            settings.end_date = value;
        }
        if let Some(value) = args.open_time {
            settings.open_time = value;
        }
        if let Some(value) = args.close_time {
            settings.close_time = value;
        }

        let traffic = &mut settings.weekday_traffic;
        if let Some(value) = args.mon_traffic {
            traffic.monday = value;
        }
        if let Some(value) = args.tue_traffic {
            traffic.tuesday = value;
        }
        if let Some(value) = args.wed_traffic {
            traffic.wednesday = value;
        }
        if let Some(value) = args.thu_traffic {
            traffic.thursday = value;
        }
        if let Some(value) = args.fri_traffic {
            traffic.friday = value;
        }
        if let Some(value) = args.sat_traffic {
            traffic.saturday = value;
        }
        if let Some(value) = args.sun_traffic {
            traffic.sunday = value;
        }

        if let Some(value) = args.lunch_start {
            settings.lunch.start = value;
        }
        if let Some(value) = args.lunch_end {
            settings.lunch.end = value;
        }
        if let Some(value) = args.lunch_time_spent {
            settings.lunch.dwell = DwellTarget::Fixed(value);
        }
        if let Some(value) = args.lunch_percent {
            settings.lunch.percent = value;
        }

        if let Some(value) = args.dinner_start {
            settings.dinner.start = value;
        }
        if let Some(value) = args.dinner_end {
            settings.dinner.end = value;
        }
        if let Some(value) = args.dinner_time_spent {
            settings.dinner.dwell = DwellTarget::Fixed(value);
        }
        if let Some(value) = args.dinner_percent {
            settings.dinner.percent = value;
        }

        if let Some(value) = args.senior_start {
            settings.senior.start = value;
        }
        if let Some(value) = args.senior_end {
            settings.senior.end = value;
        }
        if let Some(value) = args.senior_discount_percent {
            settings.senior.percent = value;
        }
        if let Some(value) = args.senior_min_time_spent {
            settings.senior.min_dwell = value;
        }
        if let Some(value) = args.senior_max_time_spent {
            settings.senior.max_dwell = value;
        }
        if let Some(value) = args.senior_day {
            settings.senior.day = value;
        }
        if let Some(value) = args.senior_percent {
            settings.percent_senior = value;
        }

        if let Some(value) = args.min_time_spent {
            settings.min_time_spent = value;
        }
        if let Some(value) = args.avg_time_spent {
            settings.avg_time_spent = value;
        }
        if let Some(value) = args.max_time_spent {
            settings.max_time_spent = value;
        }

        if let Some(value) = args.holiday_percent {
            settings.holiday_percent = value;
        }
        if let Some(value) = args.day_before_holiday_percent {
            settings.day_before_percent = value;
        }
        if let Some(value) = args.week_before_holiday_percent {
            settings.week_before_percent = value;
        }

        if let Some(value) = args.sunny_traffic_percent {
            settings.sunny_traffic_percent = value;
        }
        if let Some(value) = args.sunny_chance_percent {
            settings.sunny_chance_percent = value;
        }
        if let Some(value) = args.sunny_time_spent {
            settings.sunny_dwell = value;
        }
        if let Some(value) = args.weekend_time_spent {
            settings.weekend_dwell = value;
        }
        if args.sunny_count_inflation {
            settings.sunny_count_inflation = true;
        }

        if let Some(value) = args.holiday_calendar {
            settings.holiday_calendar = value
                .parse()
                .map_err(|reason| ConfigError::InvalidArgument {
                    flag: "holiday-calendar".to_string(),
                    reason,
                })?;
        }
        if !args.extra_holidays.is_empty() {
            settings.extra_holidays.extend(args.extra_holidays);
        }

        if let Some(value) = args.output_format {
            settings.output_format = value;
        }
        if let Some(value) = args.output {
            settings.output_path = Some(value);
        }
        if let Some(value) = args.seed {
            settings.seed = Some(value);
        }
        if args.sequential {
            settings.parallel = false;
        }

        Ok(())
    }

    /// Save settings to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print settings as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Get the output format as an enum value
    pub fn get_output_format(&self) -> Result<OutputFormat, ConfigValidationError> {
        self.output_format
            .parse()
            .map_err(|_| ConfigValidationError::InvalidOutputFormat(self.output_format.clone()))
    }
}

/// No setting accepts a negative number, so one anywhere in a
/// configuration file is reported against its dotted field path
fn reject_negative_numbers(
    value: &serde_json::Value,
    path: &str,
) -> Result<(), ConfigValidationError> {
    match value {
        serde_json::Value::Number(number) => match number.as_f64() {
            Some(n) if n < 0.0 => Err(ConfigValidationError::NegativeValue {
                field: path.to_string(),
                value: n,
            }),
            _ => Ok(()),
        },
        serde_json::Value::Object(map) => map.iter().try_for_each(|(key, child)| {
            let child_path = if path.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", path, key)
            };
            reject_negative_numbers(child, &child_path)
        }),
        serde_json::Value::Array(items) => {
            items.iter().enumerate().try_for_each(|(i, child)| {
                reject_negative_numbers(child, &format!("{}[{}]", path, i))
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_settings_default() {
        let settings = StoreSettings::default();

        assert_eq!(settings.start_date, "2020-01-01");
        assert_eq!(settings.end_date, "2020-12-31");
        assert_eq!(settings.open_time, "06:00");
        assert_eq!(settings.close_time, "21:00");
        assert_eq!(settings.weekday_traffic.monday, 800);
        assert_eq!(settings.weekday_traffic.sunday, 5000);
        assert_eq!(settings.lunch.percent, 0.10);
        assert_eq!(settings.dinner.percent, 0.15);
        assert_eq!(settings.senior.day, "Tuesday");
        assert_eq!(settings.holiday_percent, 0.2);
        assert_eq!(settings.output_format, "csv");
        assert!(settings.seed.is_none());
        assert!(settings.parallel);
        assert!(!settings.sunny_count_inflation);
    }

    #[test]
    fn test_weekday_traffic_lookup() {
        let traffic = WeekdayTraffic::default();
        assert_eq!(traffic.for_weekday(Weekday::Mon), 800);
        assert_eq!(traffic.for_weekday(Weekday::Thu), 900);
        assert_eq!(traffic.for_weekday(Weekday::Sat), 4000);
        assert_eq!(traffic.weekly_total(), 15_400);
    }

    #[test]
    fn test_cli_parsing_defaults() {
        let args = CliArgs::try_parse_from(["test"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.seed.is_none());
        assert!(!args.sequential);
        assert!(args.extra_holidays.is_empty());

        let settings = StoreSettings::from_cli_args(args).unwrap();
        assert_eq!(settings, StoreSettings::default());
    }

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs::try_parse_from([
            "test",
            "--start-date",
            "2021-03-01",
            "--end-date",
            "2021-03-31",
            "--mon-traffic",
            "650",
            "--lunch-time-spent",
            "12",
            "--senior-day",
            "Wednesday",
            "--senior-percent",
            "0.35",
            "--seed",
            "54321",
            "--extra-holiday",
            "2021-03-17",
            "--sequential",
            "--sunny-count-inflation",
        ])
        .unwrap();

        let settings = StoreSettings::from_cli_args(args).unwrap();

        assert_eq!(settings.start_date, "2021-03-01");
        assert_eq!(settings.end_date, "2021-03-31");
        assert_eq!(settings.weekday_traffic.monday, 650);
        assert_eq!(settings.lunch.dwell, DwellTarget::Fixed(12));
        assert_eq!(settings.senior.day, "Wednesday");
        assert_eq!(settings.percent_senior, 0.35);
        assert_eq!(settings.seed, Some(54321));
        assert_eq!(settings.extra_holidays, vec!["2021-03-17".to_string()]);
        assert!(!settings.parallel);
        assert!(settings.sunny_count_inflation);
        // Untouched fields keep their defaults
        assert_eq!(settings.weekday_traffic.tuesday, 1000);
        assert_eq!(settings.dinner, RushSettings::dinner());
    }

    #[test]
    fn test_cli_rejects_unknown_calendar() {
        let args =
            CliArgs::try_parse_from(["test", "--holiday-calendar", "martian"]).unwrap();
        match StoreSettings::from_cli_args(args) {
            Err(ConfigError::InvalidArgument { flag, .. }) => assert_eq!(flag, "holiday-calendar"),
            other => panic!("Expected InvalidArgument error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_file_loading_merges_defaults() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        let config_json = r#"{
            "start_date": "2019-11-01",
            "end_date": "2019-12-31",
            "weekday_traffic": { "monday": 500 },
            "lunch": {
                "start": "11:30",
                "end": "13:30",
                "dwell": { "min": 8, "max": 14 },
                "percent": 0.2
            },
            "senior": { "day": "Thursday" },
            "seed": 12345,
            "output_format": "jsonl"
        }"#;

        temp_file.write_all(config_json.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let settings = StoreSettings::from_file(temp_file.path()).unwrap();

        assert_eq!(settings.start_date, "2019-11-01");
        assert_eq!(settings.weekday_traffic.monday, 500);
        assert_eq!(settings.weekday_traffic.friday, 2500);
        assert_eq!(settings.lunch.dwell, DwellTarget::Range { min: 8, max: 14 });
        assert_eq!(settings.senior.day, "Thursday");
        assert_eq!(settings.senior.min_dwell, 45);
        assert_eq!(settings.seed, Some(12345));
        assert_eq!(settings.get_output_format().unwrap(), OutputFormat::JsonLines);
    }

    #[test]
    fn test_config_file_missing() {
        match StoreSettings::from_file("/definitely/not/here.json") {
            Err(ConfigError::FileNotFound(_)) => {}
            other => panic!("Expected FileNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_file_unsupported_extension() {
        let temp_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        match StoreSettings::from_file(temp_file.path()) {
            Err(ConfigError::UnsupportedFormat(ext)) => assert_eq!(ext, "yaml"),
            other => panic!("Expected UnsupportedFormat error, got {:?}", other),
        }
    }

    #[test]
    fn test_settings_json_round_trip() {
        let settings = StoreSettings::default();
        let json = settings.print_json().unwrap();
        let parsed: StoreSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, parsed);
    }

    #[test]
    fn test_save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut settings = StoreSettings::default();
        settings.seed = Some(9);
        settings.save_to_file(&path).unwrap();

        let loaded = StoreSettings::from_file(&path).unwrap();
        assert_eq!(loaded.seed, Some(9));
    }

    #[test]
    fn test_invalid_output_format() {
        let settings = StoreSettings { output_format: "xml".to_string(), ..Default::default() };
        assert_eq!(
            settings.get_output_format(),
            Err(ConfigValidationError::InvalidOutputFormat("xml".to_string()))
        );
    }
}
