//! Dollar bar aggregation algorithm
//!
//! Resamples a time-clock sequence of bars onto a dollar-volume clock: a
//! dollar bar closes on the time bar whose dollar volume takes the running
//! total to or past the threshold.

use crate::errors::{InvalidInput, ProcessingError};
use crate::types::{DollarBar, TimeBar, DEFAULT_BAR_INTERVAL_SECS};
use tracing::debug;

/// Dollar bar aggregator
///
/// Holds only the running accumulator between calls; time bars are never
/// retained once folded.
#[derive(Debug, Clone)]
pub struct DollarBarAggregator {
    /// Dollar volume quantum per bar
    threshold: f64,

    /// Fixed duration of each input time bar in seconds
    interval_secs: i64,

    /// Running accumulator for the bar currently being built
    state: AccumulatorState,

    /// Number of time bars accepted so far (index base for error reporting)
    bars_seen: usize,

    /// Timestamp of the last accepted time bar (ordering check)
    last_timestamp: Option<i64>,
}

/// Running accumulator threaded through the fold
#[derive(Debug, Clone, Copy)]
struct AccumulatorState {
    accumulated_volume: f64,
    running_high: f64,
    running_low: f64,
    time_bar_count: u32,
}

impl AccumulatorState {
    fn new() -> Self {
        Self {
            accumulated_volume: 0.0,
            running_high: 0.0,
            running_low: f64::INFINITY,
            time_bar_count: 0,
        }
    }

    /// Fold one time bar; returns a dollar bar when the threshold is reached
    fn fold(&mut self, bar: &TimeBar, threshold: f64, interval_secs: i64) -> Option<DollarBar> {
        let dollar_volume = bar.dollar_volume();

        // Extremes first so the triggering bar's range is included
        self.running_high = self.running_high.max(bar.high);
        self.running_low = self.running_low.min(bar.low);
        self.time_bar_count += 1;

        if dollar_volume + self.accumulated_volume >= threshold {
            let dollar_bar = DollarBar {
                timestamp: bar.timestamp + interval_secs,
                high: self.running_high,
                low: self.running_low,
                close: bar.close,
                dollar_volume: self.accumulated_volume + dollar_volume,
                time_bar_count: self.time_bar_count,
            };
            *self = Self::new();
            Some(dollar_bar)
        } else {
            self.accumulated_volume += dollar_volume;
            None
        }
    }
}

impl DollarBarAggregator {
    /// Create new aggregator for one-minute time bars
    ///
    /// # Arguments
    ///
    /// * `threshold` - Dollar volume per bar, e.g. `50_000_000.0`
    pub fn new(threshold: f64) -> Result<Self, ProcessingError> {
        Self::with_interval(threshold, DEFAULT_BAR_INTERVAL_SECS)
    }

    /// Create new aggregator with an explicit time bar duration
    ///
    /// # Arguments
    ///
    /// * `threshold` - Dollar volume per bar, must be positive and finite
    /// * `interval_secs` - Duration of each input time bar; a dollar bar is
    ///   stamped with its triggering bar's timestamp plus this value
    pub fn with_interval(threshold: f64, interval_secs: i64) -> Result<Self, ProcessingError> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(InvalidInput::NonPositiveThreshold { threshold }.into());
        }
        if interval_secs <= 0 {
            return Err(InvalidInput::NonPositiveInterval { interval_secs }.into());
        }

        Ok(Self {
            threshold,
            interval_secs,
            state: AccumulatorState::new(),
            bars_seen: 0,
            last_timestamp: None,
        })
    }

    /// Dollar volume quantum per bar
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Time bar duration in seconds
    pub fn interval_secs(&self) -> i64 {
        self.interval_secs
    }

    /// Dollar volume accumulated towards the next bar
    ///
    /// This remainder is never emitted as a bar; a dollar bar always
    /// represents a complete quantum.
    pub fn pending_dollar_volume(&self) -> f64 {
        self.state.accumulated_volume
    }

    /// Process a single time bar and return the completed dollar bar if any
    ///
    /// State persists across calls, so feeding bars one at a time yields
    /// the same output as [`process_time_bars`](Self::process_time_bars).
    pub fn process_time_bar(&mut self, bar: &TimeBar) -> Result<Option<DollarBar>, ProcessingError> {
        validate_time_bar(bar, self.bars_seen, self.last_timestamp)?;
        self.bars_seen += 1;
        self.last_timestamp = Some(bar.timestamp);

        Ok(self.state.fold(bar, self.threshold, self.interval_secs))
    }

    /// Process a batch of time bars into completed dollar bars
    ///
    /// The whole batch is validated before any state changes; on error the
    /// aggregator is left untouched. Errors report indices relative to the
    /// slice.
    pub fn process_time_bars(&mut self, bars: &[TimeBar]) -> Result<Vec<DollarBar>, ProcessingError> {
        self.validate_time_bars(bars)?;

        let mut dollar_bars = Vec::new();
        for bar in bars {
            if let Some(dollar_bar) = self.state.fold(bar, self.threshold, self.interval_secs) {
                dollar_bars.push(dollar_bar);
            }
        }
        self.bars_seen += bars.len();
        if let Some(last) = bars.last() {
            self.last_timestamp = Some(last.timestamp);
        }

        debug!(
            event_type = "aggregation_complete",
            time_bars = bars.len(),
            dollar_bars = dollar_bars.len(),
            pending_dollar_volume = self.state.accumulated_volume,
            threshold = self.threshold,
            "Aggregated time bars into dollar bars"
        );

        Ok(dollar_bars)
    }

    /// Clear the accumulator and ordering history
    pub fn reset(&mut self) {
        self.state = AccumulatorState::new();
        self.bars_seen = 0;
        self.last_timestamp = None;
    }

    fn validate_time_bars(&self, bars: &[TimeBar]) -> Result<(), ProcessingError> {
        let mut prev = self.last_timestamp;
        for (index, bar) in bars.iter().enumerate() {
            validate_time_bar(bar, index, prev)?;
            prev = Some(bar.timestamp);
        }
        Ok(())
    }
}

fn validate_time_bar(
    bar: &TimeBar,
    index: usize,
    prev_timestamp: Option<i64>,
) -> Result<(), InvalidInput> {
    if bar.volume.is_nan() || bar.volume < 0.0 {
        return Err(InvalidInput::NegativeVolume {
            index,
            volume: bar.volume,
        });
    }
    if bar.high < bar.low {
        return Err(InvalidInput::InvertedRange {
            index,
            high: bar.high,
            low: bar.low,
        });
    }
    if let Some(prev_timestamp) = prev_timestamp {
        if bar.timestamp <= prev_timestamp {
            return Err(InvalidInput::UnsortedBars {
                index,
                prev_timestamp,
                curr_timestamp: bar.timestamp,
            });
        }
    }
    Ok(())
}

/// Convert one-minute time bars into dollar bars
///
/// Convenience wrapper around a fresh [`DollarBarAggregator`]; any trailing
/// partial accumulation is discarded.
pub fn aggregate(time_bars: &[TimeBar], threshold: f64) -> Result<Vec<DollarBar>, ProcessingError> {
    aggregate_with_interval(time_bars, threshold, DEFAULT_BAR_INTERVAL_SECS)
}

/// Convert time bars of the given duration into dollar bars
pub fn aggregate_with_interval(
    time_bars: &[TimeBar],
    threshold: f64,
    interval_secs: i64,
) -> Result<Vec<DollarBar>, ProcessingError> {
    DollarBarAggregator::with_interval(threshold, interval_secs)?.process_time_bars(time_bars)
}
