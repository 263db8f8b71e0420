//! Public error types for formcheck.

use formcheck_analysis::retry::{RetryClass, RetryError, Retryable};
use formcheck_gemini::GeminiError;
use thiserror::Error;

/// Errors that can occur when analyzing a video or chatting.
///
/// Each variant maps to one retry class; see [`Retryable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Missing API key or an unusable client configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The endpoint rejected the request (HTTP 400, 401 or 403).
    #[error("Request rejected by the endpoint (HTTP {status}): {message}")]
    ClientRejected {
        /// HTTP status or embedded error code.
        status: u16,
        /// Diagnostic detail from the endpoint.
        message: String,
    },

    /// The endpoint is throttling requests (HTTP 429).
    #[error("Rate limit exceeded. Try again in a minute.")]
    RateLimited,

    /// Any other endpoint failure, HTTP or embedded in a successful body.
    #[error("Endpoint error{}: {detail}", status_suffix(.status))]
    Endpoint {
        /// HTTP status or embedded error code, when known.
        status: Option<u16>,
        /// Diagnostic detail.
        detail: String,
    },

    /// A successful response held no usable text.
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// The caller cancelled the call.
    #[error("Cancelled")]
    Cancelled,

    /// Network failure, timeout or an undecodable body.
    #[error("Transport failure: {0}")]
    Transport(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

const fn is_client_rejection(status: u16) -> bool {
    matches!(status, 400 | 401 | 403)
}

impl From<GeminiError> for Error {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::MissingApiKey(_) | GeminiError::ClientBuild(_) => {
                Self::Configuration(err.to_string())
            }
            GeminiError::RateLimited => Self::RateLimited,
            GeminiError::Http { status, body } if is_client_rejection(status) => {
                Self::ClientRejected {
                    status,
                    message: body,
                }
            }
            GeminiError::Http { status, body } => Self::Endpoint {
                status: Some(status),
                detail: body,
            },
            GeminiError::Api { code, message, status } => {
                match u16::try_from(code).ok() {
                    Some(code) if is_client_rejection(code) => Self::ClientRejected {
                        status: code,
                        message,
                    },
                    Some(429) => Self::RateLimited,
                    code => Self::Endpoint {
                        status: code,
                        detail: if status.is_empty() {
                            message
                        } else {
                            format!("{status}: {message}")
                        },
                    },
                }
            }
            GeminiError::EmptyResponse(detail) => Self::EmptyResponse(detail),
            GeminiError::Timeout(_) | GeminiError::Transport(_) | GeminiError::Decode(_) => {
                Self::Transport(err.to_string())
            }
        }
    }
}

impl From<RetryError<Error>> for Error {
    fn from(err: RetryError<Error>) -> Self {
        err.into_last_error().unwrap_or(Self::Cancelled)
    }
}

impl Retryable for Error {
    fn retry_class(&self) -> RetryClass {
        match self {
            Self::Configuration(_) | Self::ClientRejected { .. } | Self::Cancelled => {
                RetryClass::Fatal
            }
            Self::RateLimited => RetryClass::RateLimited,
            Self::Endpoint { .. } | Self::EmptyResponse(_) | Self::Transport(_) => {
                RetryClass::Transient
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_rejections_are_fatal() {
        for status in [400, 401, 403] {
            let err = Error::from(GeminiError::Http {
                status,
                body: "nope".into(),
            });
            assert_eq!(
                err,
                Error::ClientRejected {
                    status,
                    message: "nope".into()
                }
            );
            assert_eq!(err.retry_class(), RetryClass::Fatal);
        }
    }

    #[test]
    fn test_other_http_is_transient_endpoint_error() {
        let err = Error::from(GeminiError::Http {
            status: 503,
            body: "busy".into(),
        });
        assert!(matches!(err, Error::Endpoint { status: Some(503), .. }));
        assert_eq!(err.retry_class(), RetryClass::Transient);
        assert_eq!(err.to_string(), "Endpoint error (HTTP 503): busy");
    }

    #[test]
    fn test_embedded_error_codes() {
        let rejected = Error::from(GeminiError::Api {
            code: 400,
            message: "bad video".into(),
            status: "INVALID_ARGUMENT".into(),
        });
        assert!(matches!(rejected, Error::ClientRejected { status: 400, .. }));

        let internal = Error::from(GeminiError::Api {
            code: 500,
            message: "oops".into(),
            status: "INTERNAL".into(),
        });
        assert_eq!(
            internal,
            Error::Endpoint {
                status: Some(500),
                detail: "INTERNAL: oops".into()
            }
        );

        let odd = Error::from(GeminiError::Api {
            code: -1,
            message: "?".into(),
            status: String::new(),
        });
        assert!(matches!(odd, Error::Endpoint { status: None, .. }));
        assert_eq!(odd.to_string(), "Endpoint error: ?");
    }

    #[test]
    fn test_classes() {
        assert_eq!(
            Error::from(GeminiError::RateLimited).retry_class(),
            RetryClass::RateLimited
        );
        assert_eq!(
            Error::from(GeminiError::MissingApiKey("GEMINI_API_KEY")).retry_class(),
            RetryClass::Fatal
        );
        assert_eq!(
            Error::from(GeminiError::Timeout("slow".into())).retry_class(),
            RetryClass::Transient
        );
        assert_eq!(
            Error::from(GeminiError::EmptyResponse("blank".into())).retry_class(),
            RetryClass::Transient
        );
        assert_eq!(Error::Cancelled.retry_class(), RetryClass::Fatal);
    }

    #[test]
    fn test_cancelled_retry_error_maps_to_cancelled() {
        let err: RetryError<Error> = RetryError::Cancelled {
            metrics: formcheck_analysis::retry::RetryMetrics::default(),
            history: Vec::new(),
        };
        assert_eq!(Error::from(err), Error::Cancelled);
    }
}
