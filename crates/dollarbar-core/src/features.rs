//! Rolling feature derivation over dollar bars
//!
//! For each window length `p` in [`PERIOD_LENGTHS`], five scale-invariant
//! features are computed from the current and preceding bars only:
//!
//! | Feature | Formula |
//! |---------|---------|
//! | PvEWMA  | close / ewma(close, span = p) - 1 |
//! | PvCHLR  | (close - min(low, p)) / (max(high, p) - min(low, p)) |
//! | RvRHLR  | (close / close[p ago] - 1) / mean(high / low - 1, p) |
//! | CON     | (close + close[p ago]) / (2 * mean(close, p + 1)) - 1 |
//! | RACORR  | lag-1 autocorrelation of close over p bars (NaN -> 0) |
//!
//! ## Warm-up
//!
//! The first [`WARMUP_BARS`] bars never produce a row: the longest windows
//! are not populated yet. There is no partially filled output.
//!
//! ## Batch vs streaming
//!
//! [`FeatureDeriver`] consumes bars one at a time; [`derive_features`]
//! fans the seven window lengths out across threads and merges by index.
//! Both run the same [`PeriodFeatures`] state machine, so their output is
//! bit-identical.

use crate::errors::ProcessingError;
use crate::feature_math::{
    compute_convexity, compute_lag1_autocorrelation, compute_range_position,
    compute_simple_return,
};
use crate::rolling::{EwmaAccumulator, RollingWindow};
use crate::types::{
    DollarBar, FeatureRow, WindowFeatures, MIN_DOLLAR_BARS, PERIOD_COUNT, PERIOD_LENGTHS,
    WARMUP_BARS,
};
use rayon::prelude::*;
use tracing::debug;

/// Rolling state for a single window length
#[derive(Debug, Clone)]
pub struct PeriodFeatures {
    period: usize,
    ewma: EwmaAccumulator,
    highs: RollingWindow,
    lows: RollingWindow,
    range_ratios: RollingWindow,
    /// Last `p + 1` closes: oldest is the close `p` bars ago
    closes: RollingWindow,
    /// Reused buffer for the autocorrelation window
    scratch: Vec<f64>,
}

impl PeriodFeatures {
    /// Create state for window length `period` (>= 1)
    pub fn new(period: usize) -> Self {
        let period = period.max(1);
        Self {
            period,
            ewma: EwmaAccumulator::new(period),
            highs: RollingWindow::new(period),
            lows: RollingWindow::new(period),
            range_ratios: RollingWindow::new(period),
            closes: RollingWindow::new(period + 1),
            scratch: Vec::with_capacity(period),
        }
    }

    /// Window length
    pub fn period(&self) -> usize {
        self.period
    }

    /// Feed the next bar
    ///
    /// Returns `None` until `p + 1` bars have been seen, after which every
    /// window is fully populated.
    pub fn update(&mut self, bar: &DollarBar) -> Option<WindowFeatures> {
        let ewma = self.ewma.update(bar.close);
        self.highs.push(bar.high);
        self.lows.push(bar.low);
        self.range_ratios.push(bar.range_ratio());
        self.closes.push(bar.close);

        if !self.closes.is_full() {
            return None;
        }

        let close = bar.close;
        let close_lagged = self.closes.oldest()?;

        let pv_ewma = close / ewma - 1.0;
        let pv_chlr = compute_range_position(close, self.lows.min(), self.highs.max());
        let rv_rhlr = compute_simple_return(close, close_lagged) / self.range_ratios.mean();
        let con = compute_convexity(close, close_lagged, self.closes.mean());

        self.scratch.clear();
        self.scratch.extend(self.closes.iter().skip(1));
        let racorr = compute_lag1_autocorrelation(&self.scratch);

        Some(WindowFeatures {
            period: self.period,
            pv_ewma,
            pv_chlr,
            rv_rhlr,
            con,
            racorr: if racorr.is_nan() { 0.0 } else { racorr },
        })
    }
}

/// Streaming feature deriver over all window lengths
#[derive(Debug, Clone)]
pub struct FeatureDeriver {
    periods: [PeriodFeatures; PERIOD_COUNT],
    bars_seen: usize,
}

impl Default for FeatureDeriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureDeriver {
    /// Create a deriver for the standard window lengths
    pub fn new() -> Self {
        Self {
            periods: PERIOD_LENGTHS.map(PeriodFeatures::new),
            bars_seen: 0,
        }
    }

    /// Number of dollar bars consumed
    pub fn bars_seen(&self) -> usize {
        self.bars_seen
    }

    /// Whether the next call to [`update`](Self::update) will yield a row
    pub fn is_warmed_up(&self) -> bool {
        self.bars_seen >= WARMUP_BARS
    }

    /// Feed the next dollar bar
    ///
    /// Returns `None` for the first [`WARMUP_BARS`] bars, then one row per
    /// bar.
    pub fn update(&mut self, bar: &DollarBar) -> Option<FeatureRow> {
        let periods = &mut self.periods;
        let updates: [Option<WindowFeatures>; PERIOD_COUNT] =
            std::array::from_fn(|i| periods[i].update(bar));
        self.bars_seen += 1;

        if self.bars_seen <= WARMUP_BARS {
            return None;
        }
        assemble_row(bar.timestamp, updates)
    }
}

fn assemble_row(
    timestamp: i64,
    updates: [Option<WindowFeatures>; PERIOD_COUNT],
) -> Option<FeatureRow> {
    let mut windows = [WindowFeatures::default(); PERIOD_COUNT];
    for (slot, update) in windows.iter_mut().zip(updates) {
        *slot = update?;
    }
    Some(FeatureRow { timestamp, windows })
}

/// Derive the feature matrix from a complete dollar bar sequence
///
/// Output row `i` corresponds to dollar bar `i + WARMUP_BARS`.
///
/// # Errors
///
/// `InsufficientData` when fewer than [`MIN_DOLLAR_BARS`] bars are given.
pub fn derive_features(dollar_bars: &[DollarBar]) -> Result<Vec<FeatureRow>, ProcessingError> {
    if dollar_bars.len() < MIN_DOLLAR_BARS {
        return Err(ProcessingError::InsufficientData {
            available: dollar_bars.len(),
            required: MIN_DOLLAR_BARS,
        });
    }

    // Read-only fan-out: one column block per window length
    let columns: Vec<Vec<Option<WindowFeatures>>> = PERIOD_LENGTHS
        .par_iter()
        .map(|&period| {
            let mut state = PeriodFeatures::new(period);
            dollar_bars.iter().map(|bar| state.update(bar)).collect()
        })
        .collect();

    // Fan-in by bar index
    let rows: Vec<FeatureRow> = (WARMUP_BARS..dollar_bars.len())
        .filter_map(|i| {
            let updates: [Option<WindowFeatures>; PERIOD_COUNT] =
                std::array::from_fn(|p| columns[p][i]);
            assemble_row(dollar_bars[i].timestamp, updates)
        })
        .collect();

    debug!(
        event_type = "features_derived",
        dollar_bars = dollar_bars.len(),
        feature_rows = rows.len(),
        "Derived feature matrix"
    );

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{self, generators};
    use crate::types::FEATURE_COUNT;

    #[test]
    fn test_pruning_length() {
        let bars = generators::random_walk_dollar_bars(300, 42);
        let rows = derive_features(&bars).unwrap();

        assert_eq!(rows.len(), 300 - 256);
        assert_eq!(rows[0].timestamp, bars[256].timestamp);
        assert_eq!(rows[43].timestamp, bars[299].timestamp);
    }

    #[test]
    fn test_minimum_input_yields_one_row() {
        let bars = generators::random_walk_dollar_bars(MIN_DOLLAR_BARS, 1);
        let rows = derive_features(&bars).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_insufficient_data() {
        let bars = generators::random_walk_dollar_bars(256, 1);
        assert_eq!(
            derive_features(&bars),
            Err(ProcessingError::InsufficientData {
                available: 256,
                required: 257
            })
        );
        assert!(derive_features(&[]).is_err());
    }

    #[test]
    fn test_row_shape_and_order() {
        let bars = generators::random_walk_dollar_bars(260, 9);
        let rows = derive_features(&bars).unwrap();

        for row in &rows {
            assert_eq!(row.values().count(), FEATURE_COUNT);
            let periods: Vec<usize> = row.windows.iter().map(|w| w.period).collect();
            assert_eq!(periods, PERIOD_LENGTHS.to_vec());
        }
    }

    #[test]
    fn test_streaming_batch_parity() {
        let bars = generators::random_walk_dollar_bars(400, 0xBEEF);
        let batch = derive_features(&bars).unwrap();

        let mut deriver = FeatureDeriver::new();
        let streamed: Vec<FeatureRow> = bars.iter().filter_map(|b| deriver.update(b)).collect();

        assert_eq!(batch.len(), streamed.len());
        for (a, b) in batch.iter().zip(&streamed) {
            assert_eq!(a.timestamp, b.timestamp);
            let bits_a: Vec<u64> = a.values().map(f64::to_bits).collect();
            let bits_b: Vec<u64> = b.values().map(f64::to_bits).collect();
            assert_eq!(bits_a, bits_b);
        }
    }

    #[test]
    fn test_deriver_warmup_state() {
        let bars = generators::random_walk_dollar_bars(257, 3);
        let mut deriver = FeatureDeriver::new();

        for bar in &bars[..256] {
            assert!(deriver.update(bar).is_none());
        }
        assert!(deriver.is_warmed_up());
        assert!(deriver.update(&bars[256]).is_some());
        assert_eq!(deriver.bars_seen(), 257);
    }

    #[test]
    fn test_period_features_known_values() {
        // p = 4 over closes 100, 101, ..., 104 with constant 1% range
        let bars: Vec<DollarBar> = (0..5)
            .map(|i| {
                let close = 100.0 + i as f64;
                test_utils::create_test_dollar_bar(i * 60, close * 1.005, close * 0.995, close)
            })
            .collect();

        let mut state = PeriodFeatures::new(4);
        let outputs: Vec<Option<WindowFeatures>> = bars.iter().map(|b| state.update(b)).collect();
        assert!(outputs[..4].iter().all(Option::is_none));
        let features = outputs[4].unwrap();

        // CON: (104 + 100) / (2 * 102) - 1 = 0 on a straight line
        assert!(features.con.abs() < 1e-12);
        // RvRHLR: 4% return over constant range ratio 1.005/0.995 - 1
        let range_ratio = 1.005 / 0.995 - 1.0;
        assert!((features.rv_rhlr - 0.04 / range_ratio).abs() < 1e-9);
        // PvCHLR: close 104 vs low 101 * 0.995 and high 104 * 1.005
        let expected = (104.0 - 101.0 * 0.995) / (104.0 * 1.005 - 101.0 * 0.995);
        assert!((features.pv_chlr - expected).abs() < 1e-12);
        // Rising closes sit above their EWMA
        assert!(features.pv_ewma > 0.0);
        // Linear trend over the last four closes
        assert!((features.racorr - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_flat_window_features() {
        // Constant prices: zero range -> PvCHLR NaN, autocorrelation -> 0
        let bars: Vec<DollarBar> = (0..5)
            .map(|i| test_utils::create_test_dollar_bar(i * 60, 100.0, 100.0, 100.0))
            .collect();

        let mut state = PeriodFeatures::new(4);
        let features = bars.iter().filter_map(|b| state.update(b)).last().unwrap();

        assert!(features.pv_chlr.is_nan());
        assert_eq!(features.racorr, 0.0);
        assert!(features.pv_ewma.abs() < 1e-12);
        assert_eq!(features.con, 0.0);
        // 0 return over 0 range
        assert!(features.rv_rhlr.is_nan());
    }

    #[test]
    fn test_flat_inexact_price_racorr_is_zero() {
        // 300.07 has no exact binary mean over any window length
        let bars: Vec<DollarBar> = (0..300)
            .map(|i| test_utils::create_test_dollar_bar(i * 60, 300.07, 300.07, 300.07))
            .collect();
        let rows = derive_features(&bars).unwrap();

        for row in &rows {
            for window in &row.windows {
                assert_eq!(window.racorr, 0.0, "RACORR_{}", window.period);
                assert!(window.pv_chlr.is_nan());
            }
        }
    }

    #[test]
    fn test_determinism() {
        let bars = generators::random_walk_dollar_bars(350, 77);
        let first = derive_features(&bars).unwrap();
        let second = derive_features(&bars).unwrap();

        for (a, b) in first.iter().zip(&second) {
            assert!(a.values().zip(b.values()).all(|(x, y)| x.to_bits() == y.to_bits()));
        }
    }

    #[test]
    fn test_pv_chlr_bounded() {
        let bars = generators::random_walk_dollar_bars(600, 11);
        let rows = derive_features(&bars).unwrap();

        for row in &rows {
            for window in &row.windows {
                if !window.pv_chlr.is_nan() {
                    assert!(
                        (0.0..=1.0).contains(&window.pv_chlr),
                        "PvCHLR_{} out of bounds: {}",
                        window.period,
                        window.pv_chlr
                    );
                }
            }
        }
    }
}
