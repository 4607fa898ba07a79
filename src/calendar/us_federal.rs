//! US federal holidays computed rule by rule
//!
//! Each holiday is stored under its actual date and, when that falls on a
//! weekend, its observed date as well (Saturday observes on Friday, Sunday on
//! Monday). A Saturday New Year's Day is therefore also observed on December 31
//! of the previous year.

use super::HolidayCalendar;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::collections::BTreeSet;

/// First year Martin Luther King Jr. Day was observed
const MLK_DAY_FIRST_YEAR: i32 = 1986;
/// First year Juneteenth was observed
const JUNETEENTH_FIRST_YEAR: i32 = 2021;

/// Calendar of US federal holidays, optionally extended with extra dates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsFederalCalendar {
    additional: BTreeSet<NaiveDate>,
}

impl UsFederalCalendar {
    /// Create the calendar with federal holidays only
    pub fn new() -> Self {
        Self::default()
    }

    /// Add store-specific holidays on top of the federal ones
    pub fn with_additional_dates<I>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.additional.extend(dates);
        self
    }

    /// Federal holidays of `year` as `(actual date, name)`, in calendar order
    pub fn holidays_for_year(year: i32) -> Vec<(NaiveDate, &'static str)> {
        let mut holidays = Vec::with_capacity(11);
        let mut push = |date: Option<NaiveDate>, name: &'static str| {
            if let Some(date) = date {
                holidays.push((date, name));
            }
        };

        push(NaiveDate::from_ymd_opt(year, 1, 1), "New Year's Day");
        if year >= MLK_DAY_FIRST_YEAR {
            push(
                NaiveDate::from_weekday_of_month_opt(year, 1, Weekday::Mon, 3),
                "Martin Luther King Jr. Day",
            );
        }
        push(
            NaiveDate::from_weekday_of_month_opt(year, 2, Weekday::Mon, 3),
            "Washington's Birthday",
        );
        push(last_weekday_of_month(year, 5, Weekday::Mon), "Memorial Day");
        if year >= JUNETEENTH_FIRST_YEAR {
            push(NaiveDate::from_ymd_opt(year, 6, 19), "Juneteenth National Independence Day");
        }
        push(NaiveDate::from_ymd_opt(year, 7, 4), "Independence Day");
        push(NaiveDate::from_weekday_of_month_opt(year, 9, Weekday::Mon, 1), "Labor Day");
        push(NaiveDate::from_weekday_of_month_opt(year, 10, Weekday::Mon, 2), "Columbus Day");
        push(NaiveDate::from_ymd_opt(year, 11, 11), "Veterans Day");
        push(NaiveDate::from_weekday_of_month_opt(year, 11, Weekday::Thu, 4), "Thanksgiving");
        push(NaiveDate::from_ymd_opt(year, 12, 25), "Christmas Day");

        holidays
    }

    fn is_federal_holiday(date: NaiveDate) -> bool {
        // A Saturday January 1st of next year is observed on December 31st
        [date.year(), date.year() + 1].iter().any(|&year| {
            Self::holidays_for_year(year)
                .into_iter()
                .any(|(actual, _)| actual == date || observed(actual) == Some(date))
        })
    }
}

impl HolidayCalendar for UsFederalCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.additional.contains(&date) || Self::is_federal_holiday(date)
    }

    fn name(&self) -> String {
        if self.additional.is_empty() {
            "us-federal".to_string()
        } else {
            format!("us-federal+{}-extra", self.additional.len())
        }
    }
}

/// Observed date of a holiday falling on `actual`
fn observed(actual: NaiveDate) -> Option<NaiveDate> {
    match actual.weekday() {
        Weekday::Sat => actual.pred_opt(),
        Weekday::Sun => actual.succ_opt(),
        _ => Some(actual),
    }
}

fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let last_day = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    let back = (7 + last_day.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    last_day.checked_sub_days(Days::new(back as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_date_holidays() {
        let calendar = UsFederalCalendar::new();
        assert!(calendar.is_holiday(date(2020, 1, 1)));
        assert!(calendar.is_holiday(date(2020, 7, 4)));
        assert!(calendar.is_holiday(date(2020, 11, 11)));
        assert!(calendar.is_holiday(date(2020, 12, 25)));
        assert!(!calendar.is_holiday(date(2020, 12, 24)));
    }

    #[test]
    fn test_floating_holidays_2020() {
        let calendar = UsFederalCalendar::new();
        assert!(calendar.is_holiday(date(2020, 1, 20))); // MLK
        assert!(calendar.is_holiday(date(2020, 2, 17))); // Washington
        assert!(calendar.is_holiday(date(2020, 5, 25))); // Memorial
        assert!(calendar.is_holiday(date(2020, 9, 7))); // Labor
        assert!(calendar.is_holiday(date(2020, 10, 12))); // Columbus
        assert!(calendar.is_holiday(date(2020, 11, 26))); // Thanksgiving
    }

    #[test]
    fn test_observed_dates() {
        let calendar = UsFederalCalendar::new();
        // July 4 2020 was a Saturday
        assert!(calendar.is_holiday(date(2020, 7, 3)));
        // July 4 2021 was a Sunday
        assert!(calendar.is_holiday(date(2021, 7, 5)));
        // January 1 2022 was a Saturday
        assert!(calendar.is_holiday(date(2021, 12, 31)));
        // Juneteenth 2021 was a Saturday
        assert!(calendar.is_holiday(date(2021, 6, 18)));
    }

    #[test]
    fn test_introduction_years() {
        let calendar = UsFederalCalendar::new();
        assert!(!calendar.is_holiday(date(2020, 6, 19)));
        assert!(calendar.is_holiday(date(2022, 6, 20)));
        assert!(!calendar.is_holiday(date(1985, 1, 21)));
        assert!(calendar.is_holiday(date(1986, 1, 20)));
    }

    #[test]
    fn test_holidays_for_year() {
        let holidays = UsFederalCalendar::holidays_for_year(2021);
        assert_eq!(holidays.len(), 11);
        assert!(holidays.windows(2).all(|pair| pair[0].0 < pair[1].0));

        assert_eq!(UsFederalCalendar::holidays_for_year(2020).len(), 10);
    }

    #[test]
    fn test_last_weekday_of_month() {
        assert_eq!(last_weekday_of_month(2021, 5, Weekday::Mon), Some(date(2021, 5, 31)));
        assert_eq!(last_weekday_of_month(2020, 12, Weekday::Thu), Some(date(2020, 12, 31)));
    }

    #[test]
    fn test_additional_dates() {
        let extra = date(2020, 3, 17);
        let calendar = UsFederalCalendar::new().with_additional_dates([extra]);
        assert!(calendar.is_holiday(extra));
        assert!(calendar.is_holiday(date(2020, 12, 25)));
        assert_eq!(calendar.name(), "us-federal+1-extra");
        assert_eq!(UsFederalCalendar::new().name(), "us-federal");
    }
}
