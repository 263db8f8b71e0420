//! Response extraction and retry policy for exercise form analysis.
//!
//! Two independent pieces live here:
//!
//! - [`extraction`] turns the free-text critique a model returns into an
//!   [`AnalysisResult`](extraction::AnalysisResult).
//! - [`retry`] wraps any fallible async operation in a bounded retry loop
//!   that handles each failure according to its retry class.

/// Tolerant extraction of analyses from model text.
pub mod extraction;
/// Classified retry loop.
pub mod retry;

/// Convenience re-exports.
pub mod prelude {
    pub use crate::extraction::{extract_analysis, AnalysisResult, Language, ScoreLevel};
    pub use crate::retry::{
        CancelToken, RetryClass, RetryConfig, RetryError, RetryMetrics, RetryOrchestrator,
        Retryable,
    };
}
