//! Tests for per-date visit generation
//!
//! These tests drive the day generator directly with hand-built days so each
//! override step can be checked in isolation.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use shopper_traffic_simulator::simulation::{day_rng, BucketSplit, Day, DayGenerator};
use shopper_traffic_simulator::types::{
    HolidayProximity, StoreConfig, StoreSettings, VisitBucket,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn build(settings: StoreSettings) -> StoreConfig {
    settings.build().unwrap()
}

fn day(date: NaiveDate, visitor_count: u32, is_sunny: bool) -> Day {
    let weekday = date.weekday();
    let is_weekend = matches!(weekday, chrono::Weekday::Sat | chrono::Weekday::Sun);
    Day {
        date,
        weekday,
        is_weekend,
        is_sunny: is_weekend && is_sunny,
        proximity: HolidayProximity::Ordinary,
        visitor_count,
    }
}

/// 800 visitors with 10% lunch and 15% dinner split into 600 / 80 / 120
#[test]
fn test_rush_split_of_800() {
    let config = build(StoreSettings::default());
    let split = DayGenerator::new(&config).split(800);

    assert_eq!(
        split,
        BucketSplit {
            overall: 600,
            lunch: 80,
            dinner: 120,
        }
    );
    assert_eq!(split.total(), 800);
}

#[test]
fn test_weekday_buckets_follow_their_windows() {
    let config = build(StoreSettings::default());
    // Wednesday, not the senior day
    let wednesday = day(date(2020, 3, 11), 1200, false);
    let mut rng = day_rng(17, wednesday.date);

    let visits = DayGenerator::new(&config).generate_day(&wednesday, &mut rng);
    assert_eq!(visits.len(), 1200);

    for visit in &visits {
        assert_eq!(visit.date, wednesday.date);
        assert!(!visit.senior_window);
        assert!(!visit.is_sunny);

        let arrival = visit.time_in.time();
        match visit.bucket {
            VisitBucket::Overall => {
                assert!(arrival >= time(6, 0) && arrival < time(21, 0));
                assert!((6..=75).contains(&visit.time_spent));
            }
            VisitBucket::Lunch => {
                assert!(arrival >= time(12, 0) && arrival < time(13, 0));
                assert_eq!(visit.time_spent, 10);
            }
            VisitBucket::Dinner => {
                assert!(arrival >= time(17, 0) && arrival < time(18, 30));
                assert_eq!(visit.time_spent, 10);
            }
        }
    }

    let lunch = visits.iter().filter(|v| v.bucket == VisitBucket::Lunch).count();
    let dinner = visits.iter().filter(|v| v.bucket == VisitBucket::Dinner).count();
    assert_eq!(lunch, 120);
    assert_eq!(dinner, 180);
}

#[test]
fn test_overall_dwell_stays_within_bounds() {
    let mut settings = StoreSettings::default();
    settings.min_time_spent = 20;
    settings.avg_time_spent = 22;
    settings.max_time_spent = 30;
    let config = build(settings);
    let thursday = day(date(2020, 3, 12), 5000, false);
    let mut rng = day_rng(3, thursday.date);

    let visits = DayGenerator::new(&config).generate_day(&thursday, &mut rng);
    assert!(visits
        .iter()
        .filter(|v| v.bucket == VisitBucket::Overall)
        .all(|v| (20..=30).contains(&v.time_spent)));
}

#[test]
fn test_cloudy_weekend_uses_weekend_dwell() {
    let config = build(StoreSettings::default());
    let saturday = day(date(2020, 3, 14), 4000, false);
    let mut rng = day_rng(5, saturday.date);

    let visits = DayGenerator::new(&config).generate_day(&saturday, &mut rng);
    assert_eq!(visits.len(), 4000);
    assert!(visits.iter().all(|v| v.time_spent == 60));
    assert!(visits.iter().all(|v| !v.is_sunny));
}

#[test]
fn test_sunny_weekend_mixes_sunny_and_weekend_dwell() {
    let config = build(StoreSettings::default());
    let sunday = day(date(2020, 3, 15), 5000, true);
    let mut rng = day_rng(9, sunday.date);

    let visits = DayGenerator::new(&config).generate_day(&sunday, &mut rng);
    assert!(visits.iter().all(|v| v.is_sunny));
    assert!(visits.iter().all(|v| v.time_spent == 15 || v.time_spent == 60));

    // Roughly 40% take the sunny dwell
    let sunny_dwell = visits.iter().filter(|v| v.time_spent == 15).count();
    assert!(sunny_dwell > 1500 && sunny_dwell < 2500, "got {}", sunny_dwell);
}

#[test]
fn test_weekend_override_keeps_rush_arrivals() {
    let config = build(StoreSettings::default());
    let saturday = day(date(2020, 3, 14), 4000, false);
    let mut rng = day_rng(21, saturday.date);

    let visits = DayGenerator::new(&config).generate_day(&saturday, &mut rng);
    assert!(visits
        .iter()
        .filter(|v| v.bucket == VisitBucket::Lunch)
        .all(|v| v.time_in.time() >= time(12, 0) && v.time_in.time() < time(13, 0)));
}

/// With a pull probability of 1.0 every Tuesday visit lands in 10:00-12:00
#[test]
fn test_full_senior_pull_moves_every_arrival() {
    let mut settings = StoreSettings::default();
    settings.senior.percent = 1.0;
    let config = build(settings);
    let tuesday = day(date(2020, 3, 10), 1000, false);
    let mut rng = day_rng(13, tuesday.date);

    let visits = DayGenerator::new(&config).generate_day(&tuesday, &mut rng);
    assert_eq!(visits.len(), 1000);

    for visit in &visits {
        let arrival = visit.time_in.time();
        assert!(arrival >= time(10, 0) && arrival < time(12, 0));
        if visit.senior_window {
            assert!((45..=60).contains(&visit.time_spent));
        }
    }

    // Lunch and dinner arrivals start outside the window, so all were moved
    assert!(visits
        .iter()
        .filter(|v| v.bucket != VisitBucket::Overall)
        .all(|v| v.senior_window));
}

#[test]
fn test_arrivals_already_in_senior_window_stay_put() {
    let mut settings = StoreSettings::default();
    settings.senior.percent = 1.0;
    let config = build(settings);
    let tuesday = day(date(2020, 3, 10), 2000, false);
    let mut rng = day_rng(29, tuesday.date);

    let visits = DayGenerator::new(&config).generate_day(&tuesday, &mut rng);
    let untouched: Vec<_> = visits.iter().filter(|v| !v.senior_window).collect();

    // 10:00-12:00 covers 2 of 15 operating hours, so some overall arrivals
    // start inside it
    assert!(!untouched.is_empty());
    for visit in &untouched {
        assert_eq!(visit.bucket, VisitBucket::Overall);
        let arrival = visit.time_in.time();
        assert!(arrival >= time(10, 0) && arrival < time(12, 0));
        assert!(config.dwell().contains(visit.time_spent));
    }

    assert!(visits
        .iter()
        .filter(|v| v.bucket != VisitBucket::Overall)
        .all(|v| v.senior_window));
}

#[test]
fn test_senior_window_dwell_overrides_weekend_dwell() {
    let mut settings = StoreSettings::default();
    settings.senior.day = "Saturday".to_string();
    settings.senior.percent = 1.0;
    settings.weekend_dwell = 90;
    settings.sunny_dwell = 15;
    let config = build(settings);
    let saturday = day(date(2020, 3, 14), 4000, true);
    let mut rng = day_rng(31, saturday.date);

    let visits = DayGenerator::new(&config).generate_day(&saturday, &mut rng);
    let (moved, stayed): (Vec<_>, Vec<_>) = visits.iter().partition(|v| v.senior_window);

    assert!(!moved.is_empty());
    assert!(!stayed.is_empty());
    for visit in &moved {
        assert!((45..=60).contains(&visit.time_spent), "got {}", visit.time_spent);
    }
    // Visits already in the window keep the weekend dwell
    for visit in &stayed {
        assert!(visit.time_spent == 90 || visit.time_spent == 15);
    }
}

#[test]
fn test_senior_window_only_on_its_day() {
    let mut settings = StoreSettings::default();
    settings.senior.percent = 1.0;
    let config = build(settings);
    let monday = day(date(2020, 3, 9), 800, false);
    let mut rng = day_rng(13, monday.date);

    let visits = DayGenerator::new(&config).generate_day(&monday, &mut rng);
    assert!(visits.iter().all(|v| !v.senior_window));
}

#[test]
fn test_senior_flag_rate() {
    let config = build(StoreSettings::default());
    let friday = day(date(2020, 3, 13), 10_000, false);
    let mut rng = day_rng(27, friday.date);

    let visits = DayGenerator::new(&config).generate_day(&friday, &mut rng);
    let seniors = visits.iter().filter(|v| v.is_senior).count();

    // 20% expected, allow a generous margin
    assert!(seniors > 1700 && seniors < 2300, "got {}", seniors);
}

#[test]
fn test_senior_flag_extremes() {
    let mut settings = StoreSettings::default();
    settings.percent_senior = 0.0;
    let none = build(settings.clone());
    settings.percent_senior = 1.0;
    let all = build(settings);

    let friday = day(date(2020, 3, 13), 500, false);
    let visits = DayGenerator::new(&none).generate_day(&friday, &mut day_rng(1, friday.date));
    assert!(visits.iter().all(|v| !v.is_senior));

    let visits = DayGenerator::new(&all).generate_day(&friday, &mut day_rng(1, friday.date));
    assert!(visits.iter().all(|v| v.is_senior));
}

#[test]
fn test_zero_visitors_produces_nothing() {
    let config = build(StoreSettings::default());
    let monday = day(date(2020, 3, 9), 0, false);
    let visits = DayGenerator::new(&config).generate_day(&monday, &mut day_rng(0, monday.date));
    assert!(visits.is_empty());
}

#[test]
fn test_arrivals_are_whole_seconds() {
    let config = build(StoreSettings::default());
    let wednesday = day(date(2020, 3, 11), 300, false);
    let visits =
        DayGenerator::new(&config).generate_day(&wednesday, &mut day_rng(44, wednesday.date));
    assert!(visits.iter().all(|v| v.time_in.nanosecond() == 0));
}
