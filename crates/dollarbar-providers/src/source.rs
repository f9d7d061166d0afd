//! Bar source seam

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dollarbar_core::TimeBar;

/// Fetches the fixed-interval bars of one trading session
///
/// Implementations wrap a market data API. Bars come back in ascending
/// timestamp order, each stamped with its start instant. A source may
/// include a bar starting exactly at `close`; the loader trims it.
#[async_trait]
pub trait BarSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn fetch_bars(
        &self,
        symbol: &str,
        open: DateTime<Utc>,
        close: DateTime<Utc>,
    ) -> Result<Vec<TimeBar>, Self::Error>;
}
