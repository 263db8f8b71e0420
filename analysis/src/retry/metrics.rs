//! Metrics tracking for retried operations.

use std::time::Duration;

/// Metrics collected while running one retried operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetryMetrics {
    /// Total number of attempts made.
    pub total_attempts: u32,
    /// Attempts that followed a rate-limit wait.
    pub rate_limit_retries: u32,
    /// Waits actually performed, in order.
    pub waits: Vec<Duration>,
    /// Wall-clock time elapsed during the call.
    pub wall_time: Duration,
}

impl RetryMetrics {
    /// Sum of all waits.
    #[must_use]
    pub fn total_wait(&self) -> Duration {
        self.waits.iter().sum()
    }
}
