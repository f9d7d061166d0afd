//! Large-scale test data generators for integration testing
//!
//! All generators are pure: the same arguments always produce the same
//! sequence. Randomness comes from a seeded LCG, never from the OS.
//!
//! Generated data always satisfies the input contract of the aggregator:
//! strictly increasing timestamps, non-negative volume, and
//! `low <= min(open, close) <= max(open, close) <= high`.

use super::constants;
use crate::types::{DollarBar, TimeBar};

/// Deterministic linear congruential generator
#[derive(Debug, Clone)]
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed ^ 0x9E37_79B9_7F4A_7C15)
    }

    /// Next value in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Random-walk one-minute bars around `BASE_PRICE`
///
/// Per-bar dollar volume is roughly $0.5M–$3.5M; a gap of a few slots is
/// inserted every 390 bars to mimic overnight session breaks.
pub fn random_walk_time_bars(count: usize, seed: u64) -> Vec<TimeBar> {
    let mut rng = Lcg::new(seed);
    let mut bars = Vec::with_capacity(count);
    let mut price = constants::BASE_PRICE;
    let mut timestamp = constants::BASE_TIMESTAMP;

    for i in 0..count {
        if i > 0 && i % 390 == 0 {
            timestamp += 17 * 60 * constants::BAR_INTERVAL_SECS;
        }

        let open = price;
        let close = (open * (1.0 + (rng.next_f64() - 0.5) * 0.004)).max(1.0);
        let high = open.max(close) * (1.0 + rng.next_f64() * 0.001);
        let low = open.min(close) * (1.0 - rng.next_f64() * 0.001);
        let volume = (500_000.0 + rng.next_f64() * 3_000_000.0) / ((open + close) / 2.0);

        bars.push(TimeBar {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        });

        price = close;
        timestamp += constants::BAR_INTERVAL_SECS;
    }

    bars
}

/// Random-walk dollar bars with `low <= close <= high`
pub fn random_walk_dollar_bars(count: usize, seed: u64) -> Vec<DollarBar> {
    let mut rng = Lcg::new(seed);
    let mut bars = Vec::with_capacity(count);
    let mut close = constants::BASE_PRICE;
    let mut timestamp = constants::BASE_TIMESTAMP;

    for _ in 0..count {
        let prev = close;
        close = (prev * (1.0 + (rng.next_f64() - 0.5) * 0.01)).max(1.0);
        let high = prev.max(close) * (1.0 + rng.next_f64() * 0.003);
        let low = prev.min(close) * (1.0 - rng.next_f64() * 0.003);
        timestamp += constants::BAR_INTERVAL_SECS * (1 + (rng.next_f64() * 10.0) as i64);

        bars.push(DollarBar {
            timestamp,
            high,
            low,
            close,
            dollar_volume: constants::DOLLAR_THRESHOLD,
            time_bar_count: 1,
        });
    }

    bars
}

/// Sinusoidal trending dollar bars (smooth, strongly autocorrelated closes)
pub fn trending_dollar_bars(count: usize) -> Vec<DollarBar> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            let close = constants::BASE_PRICE + t * 0.05 + (t * 0.05).sin() * 2.0;
            DollarBar {
                timestamp: constants::BASE_TIMESTAMP + (i as i64 + 1) * constants::BAR_INTERVAL_SECS,
                high: close + 0.25,
                low: close - 0.25,
                close,
                dollar_volume: constants::DOLLAR_THRESHOLD,
                time_bar_count: 1,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generators_are_deterministic() {
        assert_eq!(random_walk_time_bars(500, 5), random_walk_time_bars(500, 5));
        assert_ne!(random_walk_time_bars(50, 5), random_walk_time_bars(50, 6));
        assert_eq!(random_walk_dollar_bars(300, 5), random_walk_dollar_bars(300, 5));
    }

    #[test]
    fn test_time_bars_satisfy_contract() {
        let bars = random_walk_time_bars(2_000, 99);
        for pair in bars.windows(2) {
            assert!(pair[1].timestamp > pair[0].timestamp);
        }
        for bar in &bars {
            assert!(bar.volume >= 0.0);
            assert!(bar.low <= bar.open.min(bar.close));
            assert!(bar.high >= bar.open.max(bar.close));
        }
    }

    #[test]
    fn test_dollar_bars_close_inside_range() {
        for bar in random_walk_dollar_bars(1_000, 3)
            .iter()
            .chain(trending_dollar_bars(1_000).iter())
        {
            assert!(bar.low <= bar.close && bar.close <= bar.high);
        }
    }
}
