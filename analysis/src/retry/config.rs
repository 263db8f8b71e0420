//! Configuration for retry behavior.

use std::time::Duration;

/// Configuration for retry behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of attempts, rate-limit retries included (default: 3).
    pub max_attempts: u32,
    /// Backoff unit; attempt `n` is followed by a wait of `n * base_delay` (default: 2s).
    pub base_delay: Duration,
    /// Wait before retrying a rate-limited attempt (default: 60s).
    pub rate_limit_wait: Duration,
    /// Rate-limit retries allowed per call (default: 1).
    pub max_rate_limit_retries: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            rate_limit_wait: Duration::from_secs(60),
            max_rate_limit_retries: 1,
        }
    }
}

impl RetryConfig {
    /// Set the maximum number of attempts. Values below 1 are treated as 1.
    #[must_use]
    pub const fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }

    /// Set the backoff unit.
    #[must_use]
    pub const fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Set the rate-limit wait.
    #[must_use]
    pub const fn with_rate_limit_wait(mut self, wait: Duration) -> Self {
        self.rate_limit_wait = wait;
        self
    }

    /// Set how many rate-limit retries a call may use.
    #[must_use]
    pub const fn with_max_rate_limit_retries(mut self, max: u32) -> Self {
        self.max_rate_limit_retries = max;
        self
    }

    /// Wait after failed transient attempt `attempt` (1-indexed).
    #[must_use]
    pub const fn backoff_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}
