//! Processing error types
//!
//! Two failure classes: malformed input (bad bar data, bad threshold) and
//! insufficient data (too few dollar bars to survive warm-up pruning).
//! Numerical edge cases such as zero-range windows are not errors; they
//! surface as NaN feature values.

use thiserror::Error;

/// Processing errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessingError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error(
        "Insufficient data: {available} dollar bars, at least {required} needed to produce a feature row"
    )]
    InsufficientData { available: usize, required: usize },
}

/// Reasons a time bar sequence or aggregator parameter is rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInput {
    #[error("dollar threshold {threshold} must be a positive finite value")]
    NonPositiveThreshold { threshold: f64 },

    #[error("bar interval {interval_secs}s must be positive")]
    NonPositiveInterval { interval_secs: i64 },

    #[error("negative volume {volume} at index {index}")]
    NegativeVolume { index: usize, volume: f64 },

    #[error("high {high} below low {low} at index {index}")]
    InvertedRange { index: usize, high: f64, low: f64 },

    #[error(
        "time bars not sorted at index {index}: prev_timestamp={prev_timestamp}, curr_timestamp={curr_timestamp}"
    )]
    UnsortedBars {
        index: usize,
        prev_timestamp: i64,
        curr_timestamp: i64,
    },
}
