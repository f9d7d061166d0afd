//! Request pacing

use std::time::Duration;
use tokio::time::Instant;

/// Enforces a minimum spacing between request starts
///
/// `max_requests` per `window` becomes a fixed spacing of
/// `window / max_requests`; the first request never waits.
#[derive(Debug, Clone)]
pub struct RequestThrottle {
    spacing: Duration,
    last_start: Option<Instant>,
}

impl RequestThrottle {
    pub fn new(spacing: Duration) -> Self {
        Self {
            spacing,
            last_start: None,
        }
    }

    pub fn per_window(max_requests: u32, window: Duration) -> Self {
        Self::new(window / max_requests.max(1))
    }

    pub fn spacing(&self) -> Duration {
        self.spacing
    }

    /// Wait until the next request may start, then mark it started
    ///
    /// Returns how long the call slept.
    pub async fn acquire(&mut self) -> Duration {
        let now = Instant::now();
        let waited = match self.last_start {
            Some(last) => (last + self.spacing).saturating_duration_since(now),
            None => Duration::ZERO,
        };

        if !waited.is_zero() {
            tokio::time::sleep(waited).await;
        }
        self.last_start = Some(Instant::now());
        waited
    }
}
