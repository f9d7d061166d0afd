//! Type definitions for dollar bar processing

use serde::{Deserialize, Serialize};

/// Window lengths (in dollar bars) the feature deriver computes over
pub const PERIOD_LENGTHS: [usize; PERIOD_COUNT] = [4, 8, 16, 32, 64, 128, 256];

/// Number of window lengths
pub const PERIOD_COUNT: usize = 7;

/// Feature codes in column order within each window length
pub const FEATURE_CODES: [&str; 5] = ["PvEWMA", "PvCHLR", "RvRHLR", "CON", "RACORR"];

/// Leading dollar bars dropped from the feature matrix (largest window length)
pub const WARMUP_BARS: usize = 256;

/// Minimum dollar bars needed for at least one feature row
pub const MIN_DOLLAR_BARS: usize = WARMUP_BARS + 1;

/// Number of feature columns (excluding timestamp)
pub const FEATURE_COUNT: usize = PERIOD_COUNT * FEATURE_CODES.len();

/// Duration of one minute bar in seconds
pub const DEFAULT_BAR_INTERVAL_SECS: i64 = 60;

/// Default dollar volume quantum per dollar bar ($50M)
pub const DEFAULT_DOLLAR_THRESHOLD: f64 = 50_000_000.0;

/// One fixed-interval price/volume observation
///
/// `timestamp` is the start of the interval in seconds since epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeBar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl TimeBar {
    /// Average of open and close, used as the bar's representative price
    pub fn midpoint(&self) -> f64 {
        (self.open + self.close) / 2.0
    }

    /// Approximate traded dollar value over the interval
    ///
    /// Interval bars do not carry tick-level turnover, so volume is priced
    /// at the midpoint.
    pub fn dollar_volume(&self) -> f64 {
        self.volume * self.midpoint()
    }
}

/// One volume-quantum observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DollarBar {
    /// Close instant of the triggering time bar (its timestamp + interval)
    pub timestamp: i64,

    /// Highest high across all contributing time bars
    pub high: f64,

    /// Lowest low across all contributing time bars
    pub low: f64,

    /// Close of the triggering time bar
    pub close: f64,

    /// Sum of dollar volume folded into this bar, triggering bar included
    pub dollar_volume: f64,

    /// Number of time bars folded into this bar
    pub time_bar_count: u32,
}

impl DollarBar {
    /// High/low range ratio (`high / low - 1`)
    pub fn range_ratio(&self) -> f64 {
        self.high / self.low - 1.0
    }
}

/// The five features for a single window length
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowFeatures {
    pub period: usize,
    /// Price vs EWMA: `close / ewma(close, span = p) - 1`
    pub pv_ewma: f64,
    /// Price vs cumulative high/low range, NaN on a zero-width range
    pub pv_chlr: f64,
    /// `p`-bar return over the mean high/low range ratio
    pub rv_rhlr: f64,
    /// Convexity: endpoint average over the `p + 1` bar mean, minus one
    pub con: f64,
    /// Lag-1 autocorrelation of closes, 0 when undefined
    pub racorr: f64,
}

impl WindowFeatures {
    /// Values in `FEATURE_CODES` order
    pub fn values(&self) -> [f64; 5] {
        [self.pv_ewma, self.pv_chlr, self.rv_rhlr, self.con, self.racorr]
    }
}

/// One row of the feature matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Timestamp of the dollar bar this row was derived from
    pub timestamp: i64,

    /// Features per window length, ordered as `PERIOD_LENGTHS`
    pub windows: [WindowFeatures; PERIOD_COUNT],
}

impl FeatureRow {
    /// All feature values in column order (see [`feature_column_names`])
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.windows.iter().flat_map(|w| w.values())
    }

    /// Look up a feature by column name, e.g. `feature_PvEWMA_4`
    pub fn get(&self, column: &str) -> Option<f64> {
        let rest = column.strip_prefix("feature_")?;
        let (code, period) = rest.rsplit_once('_')?;
        let period: usize = period.parse().ok()?;
        let window = self.windows.iter().find(|w| w.period == period)?;
        let slot = FEATURE_CODES.iter().position(|c| *c == code)?;
        Some(window.values()[slot])
    }

    /// The window features for a given length
    pub fn window(&self, period: usize) -> Option<&WindowFeatures> {
        self.windows.iter().find(|w| w.period == period)
    }
}

/// Feature column names in stable order: grouped by window length, then by
/// feature code
pub fn feature_column_names() -> Vec<String> {
    PERIOD_LENGTHS
        .iter()
        .flat_map(|period| {
            FEATURE_CODES
                .iter()
                .map(move |code| format!("feature_{code}_{period}"))
        })
        .collect()
}
