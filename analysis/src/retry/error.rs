//! Error types for retried operations with attempt history tracking.

use std::time::Duration;
use thiserror::Error;

use super::class::RetryClass;
use super::metrics::RetryMetrics;

/// Record of a single failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    /// The attempt number (1-indexed).
    pub attempt: u32,
    /// Display form of the error the attempt failed with.
    pub error: String,
    /// How the error was classified.
    pub class: RetryClass,
    /// Elapsed time since the call started, at the end of this attempt.
    pub elapsed: Duration,
}

/// Terminal outcome of a retried operation that did not succeed.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// The operation failed with an error that must not be retried.
    #[error("Operation failed permanently at attempt {attempt}: {error}")]
    Fatal {
        /// The error returned by the failing attempt.
        error: E,
        /// Attempt number that failed.
        attempt: u32,
        /// Metrics tracked across all attempts.
        metrics: RetryMetrics,
        /// History of all failed attempts.
        history: Vec<AttemptRecord>,
    },

    /// The attempt or rate-limit budget ran out.
    #[error("Operation failed after {attempts} attempts: {error}")]
    Exhausted {
        /// The error returned by the last attempt.
        error: E,
        /// Number of attempts made.
        attempts: u32,
        /// Metrics tracked across all attempts.
        metrics: RetryMetrics,
        /// History of all failed attempts.
        history: Vec<AttemptRecord>,
    },

    /// The call was cancelled during an attempt or a wait.
    #[error("Operation cancelled after {} attempts", .metrics.total_attempts)]
    Cancelled {
        /// Metrics tracked up to cancellation.
        metrics: RetryMetrics,
        /// History of failed attempts before cancellation.
        history: Vec<AttemptRecord>,
    },
}

impl<E> RetryError<E> {
    /// Metrics tracked up to the terminal outcome.
    #[must_use]
    pub const fn metrics(&self) -> &RetryMetrics {
        match self {
            Self::Fatal { metrics, .. }
            | Self::Exhausted { metrics, .. }
            | Self::Cancelled { metrics, .. } => metrics,
        }
    }

    /// History of failed attempts.
    #[must_use]
    pub fn history(&self) -> &[AttemptRecord] {
        match self {
            Self::Fatal { history, .. }
            | Self::Exhausted { history, .. }
            | Self::Cancelled { history, .. } => history,
        }
    }

    /// The last error, if the call ended on one.
    #[must_use]
    pub const fn last_error(&self) -> Option<&E> {
        match self {
            Self::Fatal { error, .. } | Self::Exhausted { error, .. } => Some(error),
            Self::Cancelled { .. } => None,
        }
    }

    /// Consumes `self`, returning the last error if there is one.
    #[must_use]
    pub fn into_last_error(self) -> Option<E> {
        match self {
            Self::Fatal { error, .. } | Self::Exhausted { error, .. } => Some(error),
            Self::Cancelled { .. } => None,
        }
    }

    /// Whether the call ended by cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}
