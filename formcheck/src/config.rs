//! Client configuration.

use formcheck_analysis::extraction::Language;
use formcheck_analysis::retry::RetryConfig;
use formcheck_gemini::{resolve_api_key, GeminiConfig, VIDEO_MP4};

/// Environment variable overriding the model name.
pub const MODEL_ENV_VAR: &str = "GEMINI_MODEL";
/// Environment variable overriding the endpoint base URL.
pub const BASE_URL_ENV_VAR: &str = "GEMINI_BASE_URL";
/// Environment variable holding the default language tag.
pub const LANGUAGE_ENV_VAR: &str = "FORMCHECK_LANGUAGE";

/// Configuration for a [`Client`](crate::Client).
///
/// Fixed at construction; a client never re-reads it from the environment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint, model, key and per-attempt timeouts.
    pub gemini: GeminiConfig,

    /// Attempt budget, backoff and rate-limit wait.
    pub retry: RetryConfig,

    /// MIME type sent with media payloads.
    ///
    /// Default: `video/mp4`
    pub mime_type: String,

    /// Language used for chat labels.
    ///
    /// Video analyses take their language from the call instead.
    pub language: Language,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            gemini: GeminiConfig::default(),
            retry: RetryConfig::default(),
            mime_type: VIDEO_MP4.to_string(),
            language: Language::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new `ClientConfig` with default settings.
    ///
    /// Equivalent to `ClientConfig::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from the process environment.
    ///
    /// Reads `GEMINI_API_KEY`, and optionally `GEMINI_MODEL`,
    /// `GEMINI_BASE_URL` and `FORMCHECK_LANGUAGE`. Everything else keeps its
    /// default. A missing key leaves the key empty; every call made with it
    /// then fails with `Error::Configuration`.
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = resolve_api_key(None).unwrap_or_else(|err| {
            tracing::warn!(event = "api_key_missing", error = %err, "api_key_missing");
            String::new()
        });
        let mut gemini = GeminiConfig::new(api_key);

        if let Some(model) = non_empty_var(MODEL_ENV_VAR) {
            gemini = gemini.with_model(model);
        }
        if let Some(base_url) = non_empty_var(BASE_URL_ENV_VAR) {
            gemini = gemini.with_base_url(base_url);
        }
        let language = non_empty_var(LANGUAGE_ENV_VAR)
            .map(|tag| Language::from_tag(&tag))
            .unwrap_or_default();

        tracing::debug!(
            event = "config_loaded",
            model = %gemini.model,
            base_url = %gemini.base_url,
            language = %language,
            "config_loaded"
        );

        Self {
            gemini,
            language,
            ..Self::default()
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.gemini.api_key = api_key.into();
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the chat language.
    #[must_use]
    pub const fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new();
        assert_eq!(config.mime_type, "video/mp4");
        assert_eq!(config.language, Language::Turkish);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.gemini.upload_timeout, Duration::from_secs(60));
        assert_eq!(config.gemini.response_timeout, Duration::from_secs(120));
        assert!(config.gemini.api_key.is_empty());
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::new()
            .with_api_key("k")
            .with_language(Language::English)
            .with_retry(RetryConfig::default().with_max_attempts(5));
        assert_eq!(config.gemini.api_key, "k");
        assert_eq!(config.language, Language::English);
        assert_eq!(config.retry.max_attempts, 5);
    }
}
