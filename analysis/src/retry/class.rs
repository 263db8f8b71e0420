//! Retry classification of errors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the orchestrator treats a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryClass {
    /// Give up immediately.
    Fatal,
    /// Throttled: wait the long rate-limit delay, retry a bounded number of times.
    RateLimited,
    /// Retry with linear backoff while attempts remain.
    Transient,
}

impl fmt::Display for RetryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fatal => "fatal",
            Self::RateLimited => "rate_limited",
            Self::Transient => "transient",
        })
    }
}

/// Errors that know their own [`RetryClass`].
pub trait Retryable: std::error::Error {
    /// Classifies this error for the retry policy.
    fn retry_class(&self) -> RetryClass;
}
