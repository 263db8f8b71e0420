//! Rust adapter for the Gemini `generateContent` endpoint.
//!
//! This crate builds prompt-plus-media requests, performs single HTTP
//! round-trips, and classifies the outcome into [`GeminiError`]. It never
//! retries; retry policy belongs to the caller.

/// Discovery and resolution of the API key.
pub mod discovery;
/// Error types returned by adapter operations.
pub mod error;
/// Request body builders.
pub mod request;
/// Single-attempt HTTP execution and envelope decoding.
pub mod transport;
/// Wire types and connection configuration.
pub mod types;

pub use discovery::{resolve_api_key, API_KEY_ENV_VAR};
pub use error::GeminiError;
pub use request::{build_analysis_request, build_text_request, encode_media};
pub use types::*;

use std::sync::Arc;
use tokio::sync::Semaphore;

/// Anything that can perform one `generateContent` round-trip.
///
/// [`GeminiClient`] is the production implementation; tests substitute
/// scripted ones.
#[async_trait::async_trait]
pub trait GenerateContent: Send + Sync {
    /// Sends `request` once and returns the first candidate's text.
    async fn generate_content(&self, request: &GenerateContentRequest)
        -> Result<String, GeminiError>;
}

/// High-level client for the Gemini endpoint.
///
/// Clones share one connection slot: at most one request is in flight across
/// all clones at any time, later callers queue.
#[derive(Clone)]
pub struct GeminiClient {
    config: Arc<GeminiConfig>,
    http: reqwest::Client,
    in_flight: Arc<Semaphore>,
}

impl GeminiClient {
    /// Creates a client from the given configuration.
    ///
    /// An empty API key is accepted here and reported on the first send.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::ClientBuild` if the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        let http = transport::build_http_client(&config)?;
        Ok(Self {
            config: Arc::new(config),
            http,
            in_flight: Arc::new(Semaphore::new(1)),
        })
    }

    /// Returns the connection configuration.
    #[must_use]
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Sends one request and returns the first candidate's text.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::MissingApiKey` for an empty key, otherwise the
    /// classified outcome of the round-trip.
    pub async fn send(&self, request: &GenerateContentRequest) -> Result<String, GeminiError> {
        if self.config.api_key.trim().is_empty() {
            return Err(GeminiError::MissingApiKey(API_KEY_ENV_VAR));
        }

        let _permit = self
            .in_flight
            .acquire()
            .await
            .map_err(|e| GeminiError::Transport(e.to_string()))?;

        transport::send_generate_content(&self.http, &self.config, request).await
    }
}

#[async_trait::async_trait]
impl GenerateContent for GeminiClient {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<String, GeminiError> {
        self.send(request).await
    }
}
