//! Dollar bar resampling and rolling feature derivation.
//!
//! Time bars are folded into dollar bars (one bar per fixed quantum of
//! traded dollar volume), then each dollar bar is described by 35 causal
//! rolling features over windows of 4 to 256 bars.
//!
//! ## Meta-Crate
//!
//! Re-exports the workspace crates:
//!
//! - `dollarbar-core` - Aggregator, feature deriver and types
//! - `dollarbar-providers` - Bar source, calendar and historical loader
//! - `dollarbar-config` - Layered settings and logging setup
//!
//! ## Features
//!
//! - `providers` - Provider seams and the end-to-end [`pipeline`]
//! - `config` - Configuration management
//! - `full` - Enable all features
//!
//! ## Basic Usage
//!
//! ```rust
//! use dollarbar::{DollarBarAggregator, TimeBar};
//!
//! // Close a dollar bar every $50M of traded volume
//! let mut aggregator = DollarBarAggregator::new(50_000_000.0).unwrap();
//!
//! let bar = TimeBar {
//!     timestamp: 1_420_209_000,
//!     open: 205.0,
//!     high: 205.6,
//!     low: 204.9,
//!     close: 205.4,
//!     volume: 300_000.0,
//! };
//!
//! // $61.6M in one minute: the bar closes immediately
//! let dollar_bar = aggregator.process_time_bar(&bar).unwrap().unwrap();
//! assert_eq!(dollar_bar.timestamp, 1_420_209_060);
//! ```
//!
//! ## Feature Matrix
//!
//! ```rust
//! use dollarbar::{derive_features, DollarBar, ProcessingError};
//!
//! let too_short: Vec<DollarBar> = Vec::new();
//! assert!(matches!(
//!     derive_features(&too_short),
//!     Err(ProcessingError::InsufficientData { required: 257, .. })
//! ));
//! ```

// Re-export core (always available)
pub use dollarbar_core as core;

pub use dollarbar_core::{
    aggregate, aggregate_with_interval, derive_features, feature_column_names, DollarBar,
    DollarBarAggregator, FeatureDeriver, FeatureRow, InvalidInput, ProcessingError, TimeBar,
    WindowFeatures, FEATURE_COUNT, MIN_DOLLAR_BARS, PERIOD_LENGTHS, WARMUP_BARS,
};

// Re-export optional crates
#[cfg(feature = "providers")]
pub use dollarbar_providers as providers;

#[cfg(feature = "config")]
pub use dollarbar_config as config;

#[cfg(feature = "providers")]
pub mod pipeline;
