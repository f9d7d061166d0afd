//! Historical bar loading
//!
//! Walks the calendar one session at a time: throttle, fetch, trim the
//! close-instant bar, append. Sessions are fetched sequentially so the
//! concatenated output is already in timestamp order.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

use dollarbar_core::TimeBar;

use crate::calendar::{CalendarError, TradingCalendar};
use crate::source::BarSource;
use crate::throttle::RequestThrottle;

/// Errors that can occur during historical loading
#[derive(Debug, Error)]
pub enum HistoricalError {
    /// Session enumeration failed
    #[error("calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// The bar source failed for one session
    #[error("fetch failed for {symbol} on {date}: {source}")]
    Source {
        symbol: String,
        date: NaiveDate,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Sequential, throttled session loader
pub struct HistoricalBarLoader<S, C> {
    source: S,
    calendar: C,
    throttle: RequestThrottle,
}

impl<S: BarSource, C: TradingCalendar> HistoricalBarLoader<S, C> {
    pub fn new(source: S, calendar: C, throttle: RequestThrottle) -> Self {
        Self {
            source,
            calendar,
            throttle,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load every session bar for `symbol` between `start` and `end`
    ///
    /// Empty sessions are skipped with a warning. The first source error
    /// aborts the load; nothing is retried.
    pub async fn load(
        &mut self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimeBar>, HistoricalError> {
        let sessions = self.calendar.sessions(start, end)?;
        let mut bars = Vec::new();

        info!(
            event_type = "load_start",
            symbol = %symbol,
            start = %start,
            end = %end,
            session_count = sessions.len(),
            "Loading historical bars"
        );

        for session in &sessions {
            self.throttle.acquire().await;

            let mut session_bars = self
                .source
                .fetch_bars(symbol, session.open, session.close)
                .await
                .map_err(|e| HistoricalError::Source {
                    symbol: symbol.to_string(),
                    date: session.date,
                    source: Box::new(e),
                })?;

            if session_bars
                .last()
                .is_some_and(|bar| bar.timestamp == session.close_timestamp())
            {
                session_bars.pop();
                debug!(
                    event_type = "close_bar_trimmed",
                    symbol = %symbol,
                    date = %session.date,
                    "Dropped bar starting at session close"
                );
            }

            if session_bars.is_empty() {
                warn!(
                    event_type = "session_empty",
                    symbol = %symbol,
                    date = %session.date,
                    "No bars returned for session"
                );
                continue;
            }

            info!(
                event_type = "session_loaded",
                symbol = %symbol,
                date = %session.date,
                bar_count = session_bars.len(),
                "Got bars for session"
            );
            bars.append(&mut session_bars);
        }

        info!(
            event_type = "load_complete",
            symbol = %symbol,
            bar_count = bars.len(),
            "Historical load complete"
        );
        Ok(bars)
    }
}
