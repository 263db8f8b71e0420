//! Classified retry loop for flaky remote calls.
//!
//! - [`RetryOrchestrator`] - Async retry loop with per-class policy
//! - [`Retryable`] / [`RetryClass`] - How an error wants to be treated
//! - [`RetryError`] - Terminal outcome with attempt history
//! - [`RetryMetrics`] - Attempts, waits and timing
//! - [`RetryConfig`] - Retry behavior configuration
//! - [`CancelToken`] - Cooperative cancellation

/// Cooperative cancellation token.
pub mod cancel;
/// Retry classes.
pub mod class;
/// Retry configuration.
pub mod config;
/// Terminal retry errors and attempt history.
pub mod error;
/// Retry metrics.
pub mod metrics;
/// The retry loop.
pub mod orchestrator;

pub use cancel::CancelToken;
pub use class::{RetryClass, Retryable};
pub use config::RetryConfig;
pub use error::{AttemptRecord, RetryError};
pub use metrics::RetryMetrics;
pub use orchestrator::RetryOrchestrator;
