//! Fixed-size rolling accumulators for causal window statistics
//!
//! Design:
//! - `RollingWindow`: circular buffer of the last `capacity` values
//! - O(1) push, oldest value evicted once full
//! - Statistics are summed oldest-to-newest on every call so the result
//!   does not depend on how long the window has been running
//! - `EwmaAccumulator`: bias-adjusted exponentially weighted mean

/// Fixed-capacity circular buffer of f64 observations
#[derive(Debug, Clone)]
pub struct RollingWindow {
    buffer: Vec<f64>,
    write_idx: usize, // Where next value will be written
    count: usize,     // Number of values currently held
}

impl RollingWindow {
    /// Create a new window holding at most `capacity` values
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity.max(1)],
            write_idx: 0,
            count: 0,
        }
    }

    /// Push a value, returning the evicted oldest value when full
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let evicted = if self.is_full() {
            Some(self.buffer[self.write_idx])
        } else {
            self.count += 1;
            None
        };

        self.buffer[self.write_idx] = value;
        self.write_idx = (self.write_idx + 1) % self.buffer.len();

        evicted
    }

    /// Check if window is empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Check if window holds `capacity` values
    pub fn is_full(&self) -> bool {
        self.count == self.buffer.len()
    }

    /// Get current count
    pub fn len(&self) -> usize {
        self.count
    }

    /// Get capacity
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Index of the oldest held value in the backing buffer
    fn start_idx(&self) -> usize {
        (self.write_idx + self.buffer.len() - self.count) % self.buffer.len()
    }

    /// Value at position `i` counted from the oldest held value
    pub fn get(&self, i: usize) -> Option<f64> {
        if i >= self.count {
            return None;
        }
        Some(self.buffer[(self.start_idx() + i) % self.buffer.len()])
    }

    /// Oldest held value
    pub fn oldest(&self) -> Option<f64> {
        self.get(0)
    }

    /// Most recently pushed value
    pub fn newest(&self) -> Option<f64> {
        self.count.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Iterate held values from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let start = self.start_idx();
        let len = self.buffer.len();
        (0..self.count).map(move |i| self.buffer[(start + i) % len])
    }

    /// Minimum of held values (NaN if empty)
    pub fn min(&self) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        self.iter().fold(f64::INFINITY, f64::min)
    }

    /// Maximum of held values (NaN if empty)
    pub fn max(&self) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        self.iter().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Arithmetic mean of held values (NaN if empty)
    pub fn mean(&self) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        self.iter().sum::<f64>() / self.count as f64
    }

    /// Clear all values
    pub fn clear(&mut self) {
        self.write_idx = 0;
        self.count = 0;
    }
}

/// Exponentially weighted moving average with start-of-series bias adjustment
///
/// Observation `i` steps back carries weight `(1 - alpha)^i`, with
/// `alpha = 2 / (span + 1)`. The average is the weighted sum divided by the
/// sum of weights, so the first value equals the first observation and no
/// warm-up period is needed.
#[derive(Debug, Clone)]
pub struct EwmaAccumulator {
    decay: f64,
    weighted_sum: f64,
    weight_total: f64,
}

impl EwmaAccumulator {
    /// Create a new accumulator with the given span (>= 1)
    pub fn new(span: usize) -> Self {
        let alpha = 2.0 / (span.max(1) as f64 + 1.0);
        Self {
            decay: 1.0 - alpha,
            weighted_sum: 0.0,
            weight_total: 0.0,
        }
    }

    /// Update with a new observation and return the current average
    pub fn update(&mut self, value: f64) -> f64 {
        self.weighted_sum = value + self.decay * self.weighted_sum;
        self.weight_total = 1.0 + self.decay * self.weight_total;
        self.weighted_sum / self.weight_total
    }

    /// Current average (NaN before the first update)
    pub fn value(&self) -> f64 {
        if self.weight_total == 0.0 {
            return f64::NAN;
        }
        self.weighted_sum / self.weight_total
    }

    /// Forget all observations
    pub fn reset(&mut self) {
        self.weighted_sum = 0.0;
        self.weight_total = 0.0;
    }
}
