//! Test utilities for consistent test data creation across the codebase
//!
//! ## Module Organization
//!
//! - `mod.rs`: Small-scale unit test utilities (builders, scenarios)
//! - `generators.rs`: Large-scale deterministic data generators

pub mod generators;

use crate::types::{DollarBar, TimeBar};

/// Creates a standard test TimeBar
pub fn create_test_time_bar(
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
) -> TimeBar {
    TimeBar {
        timestamp,
        open,
        high,
        low,
        close,
        volume,
    }
}

/// Creates a test DollarBar with sensible bookkeeping defaults
pub fn create_test_dollar_bar(timestamp: i64, high: f64, low: f64, close: f64) -> DollarBar {
    DollarBar {
        timestamp,
        high,
        low,
        close,
        dollar_volume: constants::DOLLAR_THRESHOLD,
        time_bar_count: 1,
    }
}

/// Standard test constants for consistent testing
pub mod constants {
    pub const BASE_PRICE: f64 = 300.0;
    pub const BASE_TIMESTAMP: i64 = 1_420_122_600; // 2015-01-01 14:30:00 UTC
    pub const BAR_INTERVAL_SECS: i64 = 60;
    pub const DOLLAR_THRESHOLD: f64 = 50_000_000.0;
}

/// Builder pattern for creating custom TimeBar sequences
///
/// Each added bar is one interval after the previous one.
pub struct TimeBarBuilder {
    base_price: f64,
    next_timestamp: i64,
    interval_secs: i64,
    bars: Vec<TimeBar>,
}

impl Default for TimeBarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeBarBuilder {
    pub fn new() -> Self {
        Self {
            base_price: constants::BASE_PRICE,
            next_timestamp: constants::BASE_TIMESTAMP,
            interval_secs: constants::BAR_INTERVAL_SECS,
            bars: Vec::new(),
        }
    }

    pub fn with_base_price(mut self, price: f64) -> Self {
        self.base_price = price;
        self
    }

    /// Add a bar whose midpoint is `base_price` and whose dollar volume is
    /// exactly `dollar_volume`, with a symmetric `spread` around the midpoint
    pub fn add_dollar_volume(mut self, dollar_volume: f64, spread: f64) -> Self {
        let mid = self.base_price;
        let bar = TimeBar {
            timestamp: self.next_timestamp,
            open: mid - spread / 2.0,
            high: mid + spread,
            low: mid - spread,
            close: mid + spread / 2.0,
            volume: dollar_volume / mid,
        };
        self.next_timestamp += self.interval_secs;
        self.bars.push(bar);
        self
    }

    /// Skip `intervals` bar slots (a gap in the session)
    pub fn skip(mut self, intervals: i64) -> Self {
        self.next_timestamp += intervals * self.interval_secs;
        self
    }

    pub fn build(self) -> Vec<TimeBar> {
        self.bars
    }
}

/// Common test scenarios
pub mod scenarios {
    use super::*;

    /// Two $30M bars against a $50M threshold: the second triggers
    pub fn two_bar_trigger() -> Vec<TimeBar> {
        vec![
            create_test_time_bar(constants::BASE_TIMESTAMP, 100.0, 102.0, 99.0, 100.0, 300_000.0),
            create_test_time_bar(
                constants::BASE_TIMESTAMP + 60,
                101.0,
                103.0,
                98.0,
                99.0,
                300_000.0,
            ),
        ]
    }

    /// Two $30M bars, a $30M trigger, then $20M that never completes
    pub fn trailing_remainder() -> Vec<TimeBar> {
        TimeBarBuilder::new()
            .with_base_price(100.0)
            .add_dollar_volume(30_000_000.0, 0.5)
            .add_dollar_volume(30_000_000.0, 0.5)
            .add_dollar_volume(20_000_000.0, 0.5)
            .build()
    }

    /// Second bar carries negative volume
    pub fn negative_volume_sequence() -> Vec<TimeBar> {
        vec![
            create_test_time_bar(constants::BASE_TIMESTAMP + 600, 100.0, 101.0, 99.0, 100.0, 10.0),
            create_test_time_bar(constants::BASE_TIMESTAMP + 660, 100.0, 101.0, 99.0, 100.0, -5.0),
        ]
    }

    /// Third bar goes back in time
    pub fn unsorted_sequence() -> Vec<TimeBar> {
        vec![
            create_test_time_bar(constants::BASE_TIMESTAMP, 100.0, 101.0, 99.0, 100.0, 10.0),
            create_test_time_bar(constants::BASE_TIMESTAMP + 60, 100.0, 101.0, 99.0, 100.0, 10.0),
            create_test_time_bar(constants::BASE_TIMESTAMP + 30, 100.0, 101.0, 99.0, 100.0, 10.0),
        ]
    }

    /// Constant-price bars of equal dollar volume
    pub fn flat_sequence(count: usize, dollar_volume: f64) -> Vec<TimeBar> {
        let mut builder = TimeBarBuilder::new();
        for _ in 0..count {
            builder = builder.add_dollar_volume(dollar_volume, 0.0);
        }
        builder.build()
    }
}
