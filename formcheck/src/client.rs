//! Form analysis client.
//!
//! # Example
//!
//! ```no_run
//! # use formcheck::{Client, ClientConfig};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(ClientConfig::from_env())?;
//!
//! let video = tokio::fs::read("squat.mp4").await?;
//! let analysis = client
//!     .analyze_video(video, "Analyze this squat.", "en")
//!     .await?;
//! println!("{}/100: {}", analysis.score, analysis.feedback);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use formcheck_analysis::extraction::{extract_analysis, AnalysisResult, Language};
use formcheck_analysis::retry::{CancelToken, RetryOrchestrator};
use formcheck_gemini::request::build_analysis_request_encoded;
use formcheck_gemini::{
    build_text_request, encode_media, GeminiClient, GenerateContent, GenerateContentRequest,
};

use crate::chat::{build_chat_prompt, ChatTurn};
use crate::config::ClientConfig;
use crate::errors::Error;

/// Video form analysis and coaching chat client.
///
/// Every call goes through the retry policy from
/// [`ClientConfig::retry`]; the underlying transport sends one request at a
/// time, so concurrent calls on clones of one client queue rather than race.
#[derive(Clone)]
pub struct Client {
    /// Single-attempt transport.
    transport: Arc<dyn GenerateContent>,
    /// Retry policy shared by every call.
    retry: RetryOrchestrator,
    /// Client configuration (endpoint, retry, MIME type, chat language).
    config: ClientConfig,
}

impl Client {
    /// Creates a client talking to the configured Gemini endpoint.
    ///
    /// An empty API key is accepted here and reported on the first call.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let gemini = GeminiClient::new(config.gemini.clone())?;
        Ok(Self::with_transport(config, Arc::new(gemini)))
    }

    /// Creates a client from the process environment.
    ///
    /// A missing `GEMINI_API_KEY` is reported on the first call.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(ClientConfig::from_env())
    }

    /// Creates a client over a custom transport.
    ///
    /// The transport's own configuration wins over `config.gemini`.
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn GenerateContent>) -> Self {
        Self {
            transport,
            retry: RetryOrchestrator::with_config(config.retry.clone()),
            config,
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Analyzes an exercise video.
    ///
    /// `language_tag` selects the fallback texts used when the response is
    /// incomplete; see [`Language::from_tag`].
    ///
    /// # Errors
    ///
    /// Returns the terminal error of the retry policy. A response that
    /// arrives but cannot be fully parsed is not an error; missing parts are
    /// filled with defaults.
    pub async fn analyze_video(
        &self,
        media: Vec<u8>,
        prompt: &str,
        language_tag: &str,
    ) -> Result<AnalysisResult, Error> {
        self.analyze_video_with_cancel(media, prompt, language_tag, &CancelToken::new())
            .await
    }

    /// Like [`analyze_video`](Self::analyze_video), but gives up with
    /// `Error::Cancelled` as soon as `cancel` fires.
    ///
    /// # Errors
    ///
    /// As [`analyze_video`](Self::analyze_video), plus `Error::Cancelled`.
    pub async fn analyze_video_with_cancel(
        &self,
        media: Vec<u8>,
        prompt: &str,
        language_tag: &str,
        cancel: &CancelToken,
    ) -> Result<AnalysisResult, Error> {
        let language = Language::from_tag(language_tag);
        tracing::info!(
            event = "analysis_started",
            media_bytes = media.len(),
            mime_type = %self.config.mime_type,
            language = %language,
            "analysis_started"
        );

        let encoded = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(Error::Cancelled),
            joined = tokio::task::spawn_blocking(move || encode_media(&media)) => {
                joined.map_err(|e| Error::Transport(format!("media encoding failed: {e}")))?
            }
        };

        let request = build_analysis_request_encoded(prompt, encoded, &self.config.mime_type);
        let text = self.send_with_retry(&request, cancel).await?;
        let result = extract_analysis(&text, language);

        tracing::info!(
            event = "analysis_finished",
            score = result.score,
            level = ?result.level(),
            "analysis_finished"
        );
        Ok(result)
    }

    /// Sends a follow-up chat message about a previous analysis.
    ///
    /// `analysis_context` is usually
    /// [`AnalysisResult::context_summary`]. The reply is returned verbatim.
    ///
    /// # Errors
    ///
    /// Returns the terminal error of the retry policy.
    pub async fn send_chat_message(
        &self,
        message: &str,
        history: &[ChatTurn],
        analysis_context: &str,
    ) -> Result<String, Error> {
        self.send_chat_message_with_cancel(message, history, analysis_context, &CancelToken::new())
            .await
    }

    /// Like [`send_chat_message`](Self::send_chat_message), but gives up
    /// with `Error::Cancelled` as soon as `cancel` fires.
    ///
    /// # Errors
    ///
    /// As [`send_chat_message`](Self::send_chat_message), plus
    /// `Error::Cancelled`.
    pub async fn send_chat_message_with_cancel(
        &self,
        message: &str,
        history: &[ChatTurn],
        analysis_context: &str,
        cancel: &CancelToken,
    ) -> Result<String, Error> {
        tracing::info!(
            event = "chat_started",
            history_turns = history.len(),
            language = %self.config.language,
            "chat_started"
        );

        let prompt = build_chat_prompt(message, history, analysis_context, self.config.language);
        let request = build_text_request(&prompt);
        let reply = self.send_with_retry(&request, cancel).await?;

        tracing::info!(event = "chat_finished", reply_chars = reply.chars().count(), "chat_finished");
        Ok(reply)
    }

    async fn send_with_retry(
        &self,
        request: &GenerateContentRequest,
        cancel: &CancelToken,
    ) -> Result<String, Error> {
        let transport = &self.transport;
        let outcome = self
            .retry
            .run_with_cancel(
                |attempt| async move {
                    tracing::debug!(event = "attempt_started", attempt, "attempt_started");
                    transport.generate_content(request).await.map_err(Error::from)
                },
                cancel,
            )
            .await;

        match outcome {
            Ok((text, metrics)) => {
                tracing::debug!(
                    event = "response_received",
                    attempts = metrics.total_attempts,
                    rate_limit_retries = metrics.rate_limit_retries,
                    waited_ms = u64::try_from(metrics.total_wait().as_millis()).unwrap_or(u64::MAX),
                    text = %text,
                    "response_received"
                );
                Ok(text)
            }
            Err(err) => {
                tracing::warn!(
                    event = "request_failed",
                    attempts = err.metrics().total_attempts,
                    cancelled = err.is_cancelled(),
                    error = %err,
                    "request_failed"
                );
                Err(err.into())
            }
        }
    }
}
