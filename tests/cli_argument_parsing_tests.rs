//! Tests for CLI argument parsing and override precedence

use clap::Parser;
use shopper_traffic_simulator::store::DwellTarget;
use shopper_traffic_simulator::types::config::CliArgs;
use shopper_traffic_simulator::types::{CalendarKind, ConfigError, StoreSettings};
use std::io::Write;

fn settings_from(args: &[&str]) -> Result<StoreSettings, ConfigError> {
    let mut argv = vec!["shopper-traffic-simulator"];
    argv.extend_from_slice(args);
    StoreSettings::from_cli_args(CliArgs::try_parse_from(argv).unwrap())
}

#[test]
fn test_no_arguments_gives_defaults() {
    let settings = settings_from(&[]).unwrap();
    assert_eq!(settings, StoreSettings::default());
}

#[test]
fn test_date_and_hours_flags() {
    let settings = settings_from(&[
        "--start-date",
        "2021-03-01",
        "--end-date",
        "2021-03-31",
        "--open-time",
        "07:00",
        "--close-time",
        "22:00",
    ])
    .unwrap();

    assert_eq!(settings.start_date, "2021-03-01");
    assert_eq!(settings.end_date, "2021-03-31");
    assert_eq!(settings.open_time, "07:00");
    assert_eq!(settings.close_time, "22:00");
}

#[test]
fn test_weekday_traffic_flags() {
    let settings = settings_from(&["--mon-traffic", "650", "--sun-traffic", "4200"]).unwrap();
    assert_eq!(settings.weekday_traffic.monday, 650);
    assert_eq!(settings.weekday_traffic.sunday, 4200);
    assert_eq!(settings.weekday_traffic.tuesday, 1000);
}

#[test]
fn test_rush_and_senior_flags() {
    let settings = settings_from(&[
        "--lunch-percent",
        "0.2",
        "--lunch-time-spent",
        "12",
        "--dinner-start",
        "18:00",
        "--senior-day",
        "Wednesday",
        "--senior-discount-percent",
        "0.3",
        "--senior-percent",
        "0.25",
    ])
    .unwrap();

    assert_eq!(settings.lunch.percent, 0.2);
    assert_eq!(settings.lunch.dwell, DwellTarget::Fixed(12));
    assert_eq!(settings.dinner.start, "18:00");
    assert_eq!(settings.senior.day, "Wednesday");
    assert_eq!(settings.senior.percent, 0.3);
    assert_eq!(settings.percent_senior, 0.25);

    let config = settings.build().unwrap();
    assert_eq!(config.senior().day(), chrono::Weekday::Wed);
}

#[test]
fn test_holiday_and_weather_flags() {
    let settings = settings_from(&[
        "--holiday-percent",
        "0.5",
        "--day-before-holiday-percent",
        "0.3",
        "--week-before-holiday-percent",
        "0.1",
        "--sunny-chance-percent",
        "0.6",
        "--sunny-count-inflation",
        "--holiday-calendar",
        "custom",
        "--extra-holiday",
        "2020-03-17",
        "--extra-holiday",
        "2020-10-31",
    ])
    .unwrap();

    assert_eq!(settings.holiday_percent, 0.5);
    assert_eq!(settings.day_before_percent, 0.3);
    assert_eq!(settings.week_before_percent, 0.1);
    assert_eq!(settings.sunny_chance_percent, 0.6);
    assert!(settings.sunny_count_inflation);
    assert_eq!(settings.holiday_calendar, CalendarKind::Custom);
    assert_eq!(settings.extra_holidays.len(), 2);
}

#[test]
fn test_output_and_run_flags() {
    let settings = settings_from(&[
        "--output-format",
        "jsonl",
        "-o",
        "visits.jsonl",
        "--seed",
        "1234",
        "--sequential",
    ])
    .unwrap();

    assert_eq!(settings.output_format, "jsonl");
    assert_eq!(settings.output_path.as_deref(), Some("visits.jsonl"));
    assert_eq!(settings.seed, Some(1234));
    assert!(!settings.parallel);
}

#[test]
fn test_unknown_calendar_is_an_argument_error() {
    let result = settings_from(&["--holiday-calendar", "lunar"]);
    assert!(matches!(result, Err(ConfigError::InvalidArgument { .. })));
}

#[test]
fn test_non_numeric_traffic_rejected_by_parser() {
    let result = CliArgs::try_parse_from(["shopper-traffic-simulator", "--mon-traffic", "many"]);
    assert!(result.is_err());
}

#[test]
fn test_special_flags() {
    let args = CliArgs::try_parse_from([
        "shopper-traffic-simulator",
        "--dry-run",
        "--print-config",
        "-v",
    ])
    .unwrap();
    assert!(args.dry_run);
    assert!(args.print_config);
    assert!(args.verbose);
    assert!(!args.debug);
}

#[test]
fn test_cli_overrides_config_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{ "start_date": "2019-01-01", "seed": 1, "holiday_percent": 0.5 }}"#).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let settings = settings_from(&["--config", &path, "--seed", "2"]).unwrap();
    assert_eq!(settings.start_date, "2019-01-01");
    assert_eq!(settings.holiday_percent, 0.5);
    assert_eq!(settings.seed, Some(2));
}
