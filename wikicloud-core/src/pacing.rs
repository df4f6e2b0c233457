//! Fixed-delay pacing between requests to a rate limited service

use std::time::Duration;
use tracing::trace;

/// Sleeps for a fixed interval between consecutive remote requests.
///
/// There is no token bucket or backoff; callers decide where a pause belongs
/// and the pacer only waits. A zero interval never touches the timer, which
/// keeps tests fast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    interval: Duration,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_millis(interval_ms: u64) -> Self {
        Self::new(Duration::from_millis(interval_ms))
    }

    /// A pacer that never waits
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait one interval
    pub async fn pause(&self, reason: &str) {
        if self.interval.is_zero() {
            return;
        }

        trace!(
            reason = reason,
            delay_ms = self.interval.as_millis() as u64,
            "Pausing before next request"
        );
        tokio::time::sleep(self.interval).await;
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::disabled()
    }
}
