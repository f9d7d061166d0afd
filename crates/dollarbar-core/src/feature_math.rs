//! Feature math helper functions
//!
//! Pure functions over already-windowed values. NaN is the result for
//! undefined quantities; callers decide whether to keep or replace it.

/// Compute price position within the high/low range
///
/// Formula: (close - min_low) / (max_high - min_low)
///
/// Range: [0, 1] when close lies inside the range. NaN when the range has
/// zero width (no coercion to a finite value).
pub(crate) fn compute_range_position(close: f64, min_low: f64, max_high: f64) -> f64 {
    let range = max_high - min_low;
    if range == 0.0 {
        return f64::NAN;
    }
    (close - min_low) / range
}

/// Compute simple return over a lag
///
/// Formula: close / close_lagged - 1
pub(crate) fn compute_simple_return(close: f64, close_lagged: f64) -> f64 {
    close / close_lagged - 1.0
}

/// Compute lag-1 autocorrelation of a series
///
/// Pearson correlation of `values[1..]` against `values[..n-1]`, each side
/// centred on its own mean. Normalised as `sxy / sqrt(sxx) / sqrt(syy)` and
/// clipped to [-1, 1].
///
/// Returns NaN with fewer than three values or when either side has zero
/// variance. Zero variance is detected on the raw values: a constant side
/// whose mean is not representable would otherwise leave rounding residue
/// in the deviations.
pub(crate) fn compute_lag1_autocorrelation(values: &[f64]) -> f64 {
    if values.len() < 3 {
        return f64::NAN;
    }

    let current = &values[1..];
    let lagged = &values[..values.len() - 1];
    if is_constant(current) || is_constant(lagged) {
        return f64::NAN;
    }
    let n = current.len() as f64;

    let mean_current = current.iter().sum::<f64>() / n;
    let mean_lagged = lagged.iter().sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in current.iter().zip(lagged) {
        let dx = x - mean_current;
        let dy = y - mean_lagged;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }

    let r = sxy / sxx.sqrt() / syy.sqrt();
    if r.is_nan() {
        r
    } else {
        r.clamp(-1.0, 1.0)
    }
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

/// Compute convexity of the path between two endpoints
///
/// Formula: (close + close_lagged) / (2 * mean) - 1
///
/// Positive when the endpoints sit above the window mean (concave-up path).
pub(crate) fn compute_convexity(close: f64, close_lagged: f64, mean: f64) -> f64 {
    (close + close_lagged) / (2.0 * mean) - 1.0
}
