//! Common imports for formcheck usage.
//!
//! ```
//! use formcheck::prelude::*;
//! ```

pub use crate::chat::{ChatRole, ChatTurn};
pub use crate::client::Client;
pub use crate::config::ClientConfig;
pub use crate::errors::Error;

pub use formcheck_analysis::extraction::{AnalysisResult, Language, ScoreLevel};
pub use formcheck_analysis::retry::{CancelToken, RetryConfig};
pub use formcheck_gemini::GeminiConfig;
