//! Orchestration layer for classified retries.

use std::future::Future;

use tokio::time::Instant;

use super::cancel::CancelToken;
use super::class::{RetryClass, Retryable};
use super::config::RetryConfig;
use super::error::{AttemptRecord, RetryError};
use super::metrics::RetryMetrics;

/// Runs an operation under a bounded, classified retry policy.
///
/// - [`RetryClass::Fatal`] ends the call after the failing attempt.
/// - [`RetryClass::RateLimited`] waits `rate_limit_wait` and retries, at most
///   `max_rate_limit_retries` times per call.
/// - [`RetryClass::Transient`] waits `attempt * base_delay` and retries.
///
/// Every retry counts toward `max_attempts`. The orchestrator keeps no state
/// between calls, so one instance can serve concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct RetryOrchestrator {
    config: RetryConfig,
}

impl RetryOrchestrator {
    /// Creates an orchestrator with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an orchestrator with the given configuration.
    #[must_use]
    pub const fn with_config(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Sets the maximum number of attempts (fluent builder pattern).
    #[must_use]
    pub const fn max_attempts(mut self, max: u32) -> Self {
        self.config.max_attempts = max;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Runs `op` until it succeeds or the policy gives up.
    ///
    /// `op` receives the 1-indexed attempt number and is called again for
    /// every retry.
    ///
    /// # Errors
    ///
    /// Returns `RetryError::Fatal` for a fatal error and
    /// `RetryError::Exhausted` when the attempt or rate-limit budget runs out.
    pub async fn run<T, E, F, Fut>(&self, op: F) -> Result<(T, RetryMetrics), RetryError<E>>
    where
        E: Retryable,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.run_with_cancel(op, &CancelToken::new()).await
    }

    /// Like [`run`](Self::run), but stops as soon as `cancel` fires.
    ///
    /// An attempt in progress when the token fires is dropped, as is a
    /// pending wait.
    ///
    /// # Errors
    ///
    /// As [`run`](Self::run), plus `RetryError::Cancelled`.
    pub async fn run_with_cancel<T, E, F, Fut>(
        &self,
        mut op: F,
        cancel: &CancelToken,
    ) -> Result<(T, RetryMetrics), RetryError<E>>
    where
        E: Retryable,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let start = Instant::now();
        let max_attempts = self.config.max_attempts.max(1);
        let mut metrics = RetryMetrics::default();
        let mut history: Vec<AttemptRecord> = Vec::new();
        let mut attempt: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(cancelled(metrics, history, start));
            }

            attempt += 1;
            metrics.total_attempts = attempt;

            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => None,
                outcome = op(attempt) => Some(outcome),
            };
            let Some(outcome) = outcome else {
                tracing::info!(event = "retry_cancelled", attempt, "retry_cancelled");
                return Err(cancelled(metrics, history, start));
            };

            let error = match outcome {
                Ok(value) => {
                    metrics.wall_time = start.elapsed();
                    tracing::debug!(
                        event = "retry_succeeded",
                        attempts = attempt,
                        wall_time_ms = u64::try_from(metrics.wall_time.as_millis()).unwrap_or(u64::MAX),
                        "retry_succeeded"
                    );
                    return Ok((value, metrics));
                }
                Err(error) => error,
            };

            let class = error.retry_class();
            history.push(AttemptRecord {
                attempt,
                error: error.to_string(),
                class,
                elapsed: start.elapsed(),
            });

            let wait = match class {
                RetryClass::Fatal => {
                    tracing::warn!(event = "retry_fatal", attempt, error = %error, "retry_fatal");
                    metrics.wall_time = start.elapsed();
                    return Err(RetryError::Fatal {
                        error,
                        attempt,
                        metrics,
                        history,
                    });
                }
                RetryClass::RateLimited => {
                    if metrics.rate_limit_retries >= self.config.max_rate_limit_retries
                        || attempt >= max_attempts
                    {
                        return Err(exhausted(error, metrics, history, start));
                    }
                    metrics.rate_limit_retries += 1;
                    self.config.rate_limit_wait
                }
                RetryClass::Transient => {
                    if attempt >= max_attempts {
                        return Err(exhausted(error, metrics, history, start));
                    }
                    self.config.backoff_for(attempt)
                }
            };

            tracing::warn!(
                event = "retry_scheduled",
                attempt,
                max_attempts,
                class = %class,
                wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                error = %error,
                "retry_scheduled"
            );
            metrics.waits.push(wait);

            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    tracing::info!(event = "retry_cancelled", attempt, "retry_cancelled");
                    return Err(cancelled(metrics, history, start));
                }
                () = tokio::time::sleep(wait) => {}
            }
        }
    }
}

fn exhausted<E: Retryable>(
    error: E,
    mut metrics: RetryMetrics,
    history: Vec<AttemptRecord>,
    start: Instant,
) -> RetryError<E> {
    metrics.wall_time = start.elapsed();
    tracing::warn!(
        event = "retry_exhausted",
        attempts = metrics.total_attempts,
        rate_limit_retries = metrics.rate_limit_retries,
        error = %error,
        "retry_exhausted"
    );
    RetryError::Exhausted {
        error,
        attempts: metrics.total_attempts,
        metrics,
        history,
    }
}

fn cancelled<E>(
    mut metrics: RetryMetrics,
    history: Vec<AttemptRecord>,
    start: Instant,
) -> RetryError<E> {
    metrics.wall_time = start.elapsed();
    RetryError::Cancelled { metrics, history }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    struct Failure(RetryClass);

    impl Retryable for Failure {
        fn retry_class(&self) -> RetryClass {
            self.0
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_first_try_has_no_waits() {
        let (value, metrics) = RetryOrchestrator::new()
            .run(|attempt| async move { Ok::<_, Failure>(attempt) })
            .await
            .unwrap();
        assert_eq!(value, 1);
        assert_eq!(metrics.total_attempts, 1);
        assert!(metrics.waits.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_exhausts_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let err = RetryOrchestrator::new()
            .run(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(Failure(RetryClass::Transient)) }
            })
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match err {
            RetryError::Exhausted {
                attempts,
                metrics,
                history,
                ..
            } => {
                assert_eq!(attempts, 3);
                assert_eq!(
                    metrics.waits,
                    vec![Duration::from_secs(2), Duration::from_secs(4)]
                );
                assert_eq!(history.len(), 3);
                assert_eq!(history[2].class, RetryClass::Transient);
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_max_attempts_still_tries_once() {
        let err = RetryOrchestrator::new()
            .max_attempts(0)
            .run(|_| async { Err::<(), _>(Failure(RetryClass::Transient)) })
            .await
            .unwrap_err();
        assert_eq!(err.metrics().total_attempts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_start() {
        let token = CancelToken::new();
        token.cancel();
        let err = RetryOrchestrator::new()
            .run_with_cancel(|_| async { Ok::<_, Failure>(()) }, &token)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(err.metrics().total_attempts, 0);
    }
}
