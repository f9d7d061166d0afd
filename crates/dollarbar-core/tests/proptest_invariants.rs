//! Property-based testing for dollar bar invariants
//!
//! Invariants proven:
//! 1. Conservation: folded + pending dollar volume == input dollar volume
//! 2. Temporal Monotonicity: dollar bar timestamps strictly increase
//! 3. Range Coverage: low <= close <= high for every emitted dollar bar
//! 4. Streaming/Batch Parity: bar-at-a-time == whole-slice aggregation
//! 5. PvCHLR Bounds: [0, 1] whenever the rolling range is non-zero

use dollarbar_core::{
    derive_features, DollarBar, DollarBarAggregator, TimeBar, MIN_DOLLAR_BARS,
};
use proptest::prelude::*;

/// Strategy: one valid time bar shape (timestamp assigned later)
fn time_bar_shape() -> impl Strategy<Value = (f64, f64, f64, f64, f64)> {
    (
        10.0f64..500.0,   // open
        -0.02f64..0.02,   // close return
        0.0f64..0.01,     // high extension
        0.0f64..0.01,     // low extension
        0.0f64..50_000.0, // volume
    )
}

/// Strategy: ordered, gap-tolerant time bar sequence
fn time_bar_sequence(max_len: usize) -> impl Strategy<Value = Vec<TimeBar>> {
    prop::collection::vec((time_bar_shape(), 1i64..5), 0..max_len).prop_map(|shapes| {
        let mut timestamp = 1_420_122_600i64;
        shapes
            .into_iter()
            .map(|((open, ret, up, down, volume), step)| {
                let close = open * (1.0 + ret);
                timestamp += step * 60;
                TimeBar {
                    timestamp,
                    open,
                    high: open.max(close) * (1.0 + up),
                    low: open.min(close) * (1.0 - down),
                    close,
                    volume,
                }
            })
            .collect()
    })
}

/// Strategy: dollar bars long enough to produce feature rows
fn dollar_bar_sequence() -> impl Strategy<Value = Vec<DollarBar>> {
    prop::collection::vec(
        (-0.01f64..0.01, 0.0f64..0.005, 0.0f64..0.005),
        MIN_DOLLAR_BARS..MIN_DOLLAR_BARS + 40,
    )
    .prop_map(|steps| {
        let mut close = 100.0;
        steps
            .into_iter()
            .enumerate()
            .map(|(i, (ret, up, down))| {
                let prev = close;
                close = prev * (1.0 + ret);
                DollarBar {
                    timestamp: 60 * (i as i64 + 1),
                    high: prev.max(close) * (1.0 + up),
                    low: prev.min(close) * (1.0 - down),
                    close,
                    dollar_volume: 1.0,
                    time_bar_count: 1,
                }
            })
            .collect()
    })
}

proptest! {
    /// Proves: no dollar volume is created or lost by aggregation
    #[test]
    fn conservation_of_dollar_volume(
        bars in time_bar_sequence(400),
        threshold in 10_000.0f64..20_000_000.0,
    ) {
        let mut aggregator = DollarBarAggregator::new(threshold).unwrap();
        let dollar_bars = aggregator.process_time_bars(&bars).unwrap();

        let input: f64 = bars.iter().map(TimeBar::dollar_volume).sum();
        let folded: f64 = dollar_bars.iter().map(|b| b.dollar_volume).sum();
        let total = folded + aggregator.pending_dollar_volume();

        prop_assert!((input - total).abs() <= input * 1e-9 + 1e-6,
            "input={} folded+pending={}", input, total);
        prop_assert!(aggregator.pending_dollar_volume() < threshold);
    }

    /// Proves: output timestamps strictly increase and are input close instants
    #[test]
    fn timestamps_strictly_increase(
        bars in time_bar_sequence(400),
        threshold in 10_000.0f64..5_000_000.0,
    ) {
        let mut aggregator = DollarBarAggregator::new(threshold).unwrap();
        let dollar_bars = aggregator.process_time_bars(&bars).unwrap();

        for pair in dollar_bars.windows(2) {
            prop_assert!(pair[1].timestamp > pair[0].timestamp);
        }
        for bar in &dollar_bars {
            prop_assert!(bars.iter().any(|t| t.timestamp + 60 == bar.timestamp));
            prop_assert!(bar.low <= bar.close && bar.close <= bar.high);
            prop_assert!(bar.time_bar_count >= 1);
        }
    }

    /// Proves: streaming and batch aggregation agree exactly
    #[test]
    fn streaming_matches_batch(
        bars in time_bar_sequence(200),
        threshold in 10_000.0f64..5_000_000.0,
    ) {
        let batch = DollarBarAggregator::new(threshold).unwrap().process_time_bars(&bars).unwrap();

        let mut aggregator = DollarBarAggregator::new(threshold).unwrap();
        let mut streamed = Vec::new();
        for bar in &bars {
            if let Some(dollar_bar) = aggregator.process_time_bar(bar).unwrap() {
                streamed.push(dollar_bar);
            }
        }

        prop_assert_eq!(batch, streamed);
    }

    /// Proves: PvCHLR lies in [0, 1] for every defined value
    #[test]
    fn pv_chlr_bounded(bars in dollar_bar_sequence()) {
        let rows = derive_features(&bars).unwrap();
        prop_assert_eq!(rows.len(), bars.len() - 256);

        for row in &rows {
            for window in &row.windows {
                if !window.pv_chlr.is_nan() {
                    prop_assert!((0.0..=1.0).contains(&window.pv_chlr),
                        "PvCHLR_{} = {}", window.period, window.pv_chlr);
                }
                prop_assert!((-1.0..=1.0).contains(&window.racorr));
            }
        }
    }
}
