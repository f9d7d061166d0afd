//! Core dollar bar processing algorithms
//!
//! Time-clock to dollar-clock resampling and causal rolling feature
//! derivation.
//!
//! ## Features
//!
//! - Threshold inclusion: the bar that reaches the dollar threshold closes the dollar bar
//! - Complete quanta only: trailing partial volume is never emitted
//! - Strictly causal features: each row uses the current and earlier bars only
//! - Fixed warm-up: the first 256 dollar bars are dropped, never NaN-padded
//! - Streaming/batch parity: incremental and bulk paths produce identical bits

pub mod errors;
pub mod features;
pub mod processor;
pub mod rolling;
pub mod types;

mod feature_math;

// Test utilities (only available in test builds or with test-utils feature)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export commonly used types
pub use errors::{InvalidInput, ProcessingError};
pub use features::{derive_features, FeatureDeriver, PeriodFeatures};
pub use processor::{aggregate, aggregate_with_interval, DollarBarAggregator};
pub use rolling::{EwmaAccumulator, RollingWindow};
pub use types::{
    feature_column_names, DollarBar, FeatureRow, TimeBar, WindowFeatures,
    DEFAULT_BAR_INTERVAL_SECS, DEFAULT_DOLLAR_THRESHOLD, FEATURE_CODES, FEATURE_COUNT,
    MIN_DOLLAR_BARS, PERIOD_COUNT, PERIOD_LENGTHS, WARMUP_BARS,
};
