//! Trading session calendars

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors produced while enumerating sessions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalendarError {
    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("session open {open} is not before session close {close}")]
    InvalidSessionHours { open: NaiveTime, close: NaiveTime },
}

/// One regular trading session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub date: NaiveDate,
    pub open: DateTime<Utc>,
    pub close: DateTime<Utc>,
}

impl Session {
    /// Unix timestamp (seconds) of the session close
    pub fn close_timestamp(&self) -> i64 {
        self.close.timestamp()
    }
}

/// Enumerates the trading sessions in a date range
pub trait TradingCalendar {
    /// Sessions between `start` and `end` (both inclusive), in date order
    fn sessions(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Session>, CalendarError>;
}

/// Weekday sessions at fixed UTC hours with an explicit holiday list
///
/// No daylight-saving adjustment and no early closes.
#[derive(Debug, Clone)]
pub struct FixedSessionCalendar {
    open: NaiveTime,
    close: NaiveTime,
    holidays: BTreeSet<NaiveDate>,
}

impl FixedSessionCalendar {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Result<Self, CalendarError> {
        if open >= close {
            return Err(CalendarError::InvalidSessionHours { open, close });
        }
        Ok(Self {
            open,
            close,
            holidays: BTreeSet::new(),
        })
    }

    pub fn with_holidays(mut self, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.holidays.extend(holidays);
        self
    }

    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.holidays.contains(&date)
    }
}

impl TradingCalendar for FixedSessionCalendar {
    fn sessions(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Session>, CalendarError> {
        if start > end {
            return Err(CalendarError::InvalidRange { start, end });
        }

        Ok(start
            .iter_days()
            .take_while(|date| *date <= end)
            .filter(|date| self.is_trading_day(*date))
            .map(|date| Session {
                date,
                open: date.and_time(self.open).and_utc(),
                close: date.and_time(self.close).and_utc(),
            })
            .collect())
    }
}
