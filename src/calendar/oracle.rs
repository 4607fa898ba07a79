//! Classification of dates relative to the next holiday

use super::{FixedCalendar, HolidayCalendar, UsFederalCalendar};
use crate::types::{CalendarKind, HolidayProximity, StoreConfig};
use chrono::{Days, NaiveDate};
use std::sync::Arc;

/// Furthest look-ahead, in days, that still affects traffic
const WEEK_BEFORE_HORIZON: u8 = 7;

/// Classifies dates against an injected holiday calendar
#[derive(Debug, Clone)]
pub struct HolidayOracle {
    calendar: Arc<dyn HolidayCalendar>,
}

impl HolidayOracle {
    /// Wrap a calendar
    pub fn new<C: HolidayCalendar + 'static>(calendar: C) -> Self {
        Self { calendar: Arc::new(calendar) }
    }

    /// Build the oracle the configuration asks for
    pub fn from_config(config: &StoreConfig) -> Self {
        let extra = config.extra_holidays().iter().copied();
        match config.holiday_calendar() {
            CalendarKind::UsFederal => {
                Self::new(UsFederalCalendar::new().with_additional_dates(extra))
            }
            CalendarKind::Custom => Self::new(FixedCalendar::new("custom", extra)),
        }
    }

    /// Name and version of the backing calendar
    pub fn calendar_name(&self) -> String {
        self.calendar.name()
    }

    /// Classify `date`; the closest holiday wins
    pub fn classify(&self, date: NaiveDate) -> HolidayProximity {
        if self.calendar.is_holiday(date) {
            return HolidayProximity::OnHoliday;
        }
        if self.is_holiday_in(date, 1) {
            return HolidayProximity::DayBefore;
        }
        (2..=WEEK_BEFORE_HORIZON)
            .find(|&offset| self.is_holiday_in(date, offset))
            .map(HolidayProximity::WithinWeekBefore)
            .unwrap_or(HolidayProximity::Ordinary)
    }

    fn is_holiday_in(&self, date: NaiveDate, offset: u8) -> bool {
        date.checked_add_days(Days::new(offset as u64))
            .is_some_and(|ahead| self.calendar.is_holiday(ahead))
    }
}
