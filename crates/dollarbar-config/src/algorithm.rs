//! Dollar bar aggregation configuration

use crate::ConfigValidationError;
use dollarbar_core::{
    DollarBarAggregator, ProcessingError, DEFAULT_BAR_INTERVAL_SECS, DEFAULT_DOLLAR_THRESHOLD,
};
use serde::{Deserialize, Serialize};

/// Aggregation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmConfig {
    /// Dollar volume quantum that closes a dollar bar
    pub dollar_threshold: f64,

    /// Length of one input time bar in seconds
    pub bar_interval_secs: i64,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            dollar_threshold: DEFAULT_DOLLAR_THRESHOLD,
            bar_interval_secs: DEFAULT_BAR_INTERVAL_SECS,
        }
    }
}

impl AlgorithmConfig {
    /// Same bounds the aggregator enforces
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.dollar_threshold.is_finite() || self.dollar_threshold <= 0.0 {
            return Err(ConfigValidationError::DollarThreshold(self.dollar_threshold));
        }
        if self.bar_interval_secs <= 0 {
            return Err(ConfigValidationError::BarInterval(self.bar_interval_secs));
        }
        Ok(())
    }

    /// Build an aggregator from these parameters
    pub fn aggregator(&self) -> Result<DollarBarAggregator, ProcessingError> {
        DollarBarAggregator::with_interval(self.dollar_threshold, self.bar_interval_secs)
    }
}
