use thiserror::Error;

/// Errors produced by a single round-trip to the Gemini endpoint.
///
/// The adapter never retries; callers decide what to do with each variant.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// No API key was configured.
    #[error("Gemini API key is not configured (set {0})")]
    MissingApiKey(&'static str),

    /// The endpoint answered with HTTP 429.
    #[error("Rate limit exceeded (HTTP 429)")]
    RateLimited,

    /// The endpoint answered with a non-2xx status other than 429.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for diagnostics.
        body: String,
    },

    /// A 2xx response carried an application-level `error` object.
    #[error("Gemini API error {code} ({status}): {message}")]
    Api {
        /// Error code reported by the endpoint (mirrors an HTTP status).
        code: i64,
        /// Human-readable message.
        message: String,
        /// Symbolic status, e.g. `INVALID_ARGUMENT`.
        status: String,
    },

    /// The envelope was valid but held no usable text.
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// The request did not complete within its time budget.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Connection-level failure (DNS, refused, reset).
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl GeminiError {
    /// HTTP-equivalent status carried by this error, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RateLimited => Some(429),
            Self::Http { status, .. } => Some(*status),
            Self::Api { code, .. } => u16::try_from(*code).ok(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GeminiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

impl From<serde_json::Error> for GeminiError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}
