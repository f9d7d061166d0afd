//! Historical bar source configuration

use crate::ConfigValidationError;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which bars to fetch and how fast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Instrument symbol
    pub symbol: String,

    /// First calendar date (inclusive)
    pub start_date: NaiveDate,

    /// Last calendar date (inclusive)
    pub end_date: NaiveDate,

    /// Requests allowed per rate window
    pub max_requests_per_window: u32,

    /// Rate window length in seconds
    pub rate_window_secs: u64,

    /// Regular session open (UTC)
    pub session_open: NaiveTime,

    /// Regular session close (UTC)
    pub session_close: NaiveTime,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            symbol: "SPY".to_string(),
            start_date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2020, 8, 31).unwrap_or_default(),
            max_requests_per_window: 200,
            rate_window_secs: 60,
            session_open: NaiveTime::from_hms_opt(14, 30, 0).unwrap_or_default(),
            session_close: NaiveTime::from_hms_opt(21, 0, 0).unwrap_or_default(),
        }
    }
}

impl SourceConfig {
    /// Minimum spacing between request starts
    pub fn request_interval(&self) -> Duration {
        Duration::from_secs(self.rate_window_secs) / self.max_requests_per_window.max(1)
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.start_date > self.end_date {
            return Err(ConfigValidationError::DateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if self.session_open >= self.session_close {
            return Err(ConfigValidationError::SessionHours {
                open: self.session_open,
                close: self.session_close,
            });
        }
        if self.max_requests_per_window == 0 {
            return Err(ConfigValidationError::ZeroLimit {
                field: "max_requests_per_window",
            });
        }
        if self.rate_window_secs == 0 {
            return Err(ConfigValidationError::ZeroLimit {
                field: "rate_window_secs",
            });
        }
        Ok(())
    }
}
