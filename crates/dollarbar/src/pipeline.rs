//! Load, aggregate, derive
//!
//! Time bars for every session are loaded first, then folded into dollar
//! bars in one batch, then turned into the feature matrix.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use dollarbar_core::{derive_features, DollarBarAggregator, FeatureRow, ProcessingError};
use dollarbar_providers::{BarSource, HistoricalBarLoader, HistoricalError, TradingCalendar};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Historical(#[from] HistoricalError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),
}

/// Build the feature matrix for `symbol` over `start..=end`
pub async fn build_feature_matrix<S, C>(
    loader: &mut HistoricalBarLoader<S, C>,
    aggregator: &mut DollarBarAggregator,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<FeatureRow>, PipelineError>
where
    S: BarSource,
    C: TradingCalendar,
{
    let time_bars = loader.load(symbol, start, end).await?;
    let dollar_bars = aggregator.process_time_bars(&time_bars)?;
    let rows = derive_features(&dollar_bars)?;

    info!(
        event_type = "pipeline_complete",
        symbol = %symbol,
        time_bars = time_bars.len(),
        dollar_bars = dollar_bars.len(),
        feature_rows = rows.len(),
        "Feature matrix built"
    );
    Ok(rows)
}
