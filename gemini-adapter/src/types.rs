//! Wire types for the `generateContent` endpoint and adapter configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// MIME type used for inlined exercise videos.
pub const VIDEO_MP4: &str = "video/mp4";

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    /// Content units; this adapter always sends exactly one.
    pub contents: Vec<Content>,
}

/// One content unit made of ordered parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Ordered parts of the unit.
    pub parts: Vec<Part>,
}

/// A request part: either text or inlined media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Prompt text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Base64 media payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    /// Creates a text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// Creates an inlined media part from already-encoded data.
    #[must_use]
    pub fn inline(mime_type: impl Into<String>, data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data,
            }),
        }
    }
}

/// Media embedded directly in the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type of the decoded payload.
    pub mime_type: String,
    /// Standard base64 of the payload.
    pub data: String,
}

/// Response envelope from `generateContent`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    /// Generated alternatives; only the first is consulted.
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
    /// Application-level error, which may arrive with a 2xx status.
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// One generated alternative.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    /// Generated content; absent when the model produced nothing.
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

/// Content of a candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    /// Ordered response parts.
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// A response part; non-text parts carry no `text`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsePart {
    /// Text payload.
    #[serde(default)]
    pub text: Option<String>,
}

/// Structured error object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Numeric code (mirrors an HTTP status).
    #[serde(default)]
    pub code: i64,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Symbolic status.
    #[serde(default)]
    pub status: String,
}

/// Connection settings for a [`crate::GeminiClient`].
///
/// Timeouts apply per attempt; they are never cumulative across retries.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key sent as the `key` query parameter. May be empty; an empty key
    /// is reported when a request is sent, not at construction.
    pub api_key: String,
    /// API root, without a trailing slash.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Budget for connecting and uploading the request.
    ///
    /// Default: 60 seconds.
    pub upload_timeout: Duration,
    /// Budget for the whole exchange including inference.
    ///
    /// Default: 120 seconds.
    pub response_timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            upload_timeout: Duration::from_secs(60),
            response_timeout: Duration::from_secs(120),
        }
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &if self.api_key.is_empty() { "<empty>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("upload_timeout", &self.upload_timeout)
            .field("response_timeout", &self.response_timeout)
            .finish()
    }
}

impl GeminiConfig {
    /// Creates a config with the given key and default endpoint settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Overrides the API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides both per-attempt timeouts.
    #[must_use]
    pub const fn with_timeouts(mut self, upload: Duration, response: Duration) -> Self {
        self.upload_timeout = upload;
        self.response_timeout = response;
        self
    }

    /// Endpoint URL without the key query parameter.
    #[must_use]
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case_and_omits_empty_fields() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text("hi"), Part::inline(VIDEO_MP4, "AAEC".to_string())],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{
                    "parts": [
                        {"text": "hi"},
                        {"inlineData": {"mimeType": "video/mp4", "data": "AAEC"}}
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let resp: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{}}, {}]}"#).unwrap();
        let candidates = resp.candidates.unwrap();
        assert!(candidates[0].content.as_ref().unwrap().parts.is_empty());
        assert!(candidates[1].content.is_none());
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_generate_content_url() {
        let config = GeminiConfig::new("k")
            .with_base_url("http://localhost:1234/v1beta/")
            .with_model("gemini-test");
        assert_eq!(
            config.generate_content_url(),
            "http://localhost:1234/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", GeminiConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
