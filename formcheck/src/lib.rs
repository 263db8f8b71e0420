//! # formcheck
//!
//! Exercise form analysis from video, backed by Gemini.
//!
//! A [`Client`] uploads a clip with an exercise prompt, retries under a
//! classified policy (client rejections fail fast, rate limits wait once,
//! everything else backs off linearly) and turns the model's free-text
//! critique into a fully populated [`AnalysisResult`]. Follow-up questions
//! about an analysis go through [`Client::send_chat_message`].
//!
//! ## Example
//!
//! ```no_run
//! # use formcheck::prelude::*;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::from_env()?;
//! let video = tokio::fs::read("deadlift.mp4").await?;
//!
//! let analysis = client.analyze_video(video, "Analyze this deadlift.", "tr").await?;
//! let context = analysis.context_summary("Deadlift", Language::Turkish);
//!
//! let reply = client
//!     .send_chat_message("Sırtım neden yuvarlanıyor?", &[], &context)
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

/// Coaching chat prompt composition.
pub mod chat;

/// Form analysis client.
pub mod client;

/// Client configuration.
pub mod config;

/// Public error types.
pub mod errors;

/// Commonly used types.
pub mod prelude;

pub use client::Client;
pub use config::ClientConfig;
pub use errors::Error;
pub use formcheck_analysis::extraction::{AnalysisResult, Language, ScoreLevel};
pub use formcheck_analysis::retry::CancelToken;
