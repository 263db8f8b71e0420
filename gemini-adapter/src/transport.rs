use crate::error::GeminiError;
use crate::types::{GeminiConfig, GenerateContentRequest, GenerateContentResponse};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Instant;

/// Bytes of an error body kept for diagnostics.
const MAX_ERROR_BODY: usize = 512;

/// Builds the HTTP client used for every attempt.
///
/// `upload_timeout` bounds connection setup, `response_timeout` bounds the
/// whole exchange. The idle pool is capped at one connection to the host.
pub fn build_http_client(config: &GeminiConfig) -> Result<reqwest::Client, GeminiError> {
    reqwest::Client::builder()
        .connect_timeout(config.upload_timeout)
        .timeout(config.response_timeout)
        .pool_max_idle_per_host(1)
        .build()
        .map_err(|e| GeminiError::ClientBuild(e.to_string()))
}

/// Performs exactly one `generateContent` round-trip and returns the first
/// candidate's text.
pub async fn send_generate_content(
    http: &reqwest::Client,
    config: &GeminiConfig,
    request: &GenerateContentRequest,
) -> Result<String, GeminiError> {
    let url = config.generate_content_url();
    let start_time = Instant::now();

    let body = serde_json::to_vec(request)?;
    tracing::debug!(
        event = "gemini_request_start",
        model = %config.model,
        body_bytes = body.len(),
        "gemini_request_start"
    );

    let response = http
        .post(&url)
        .query(&[("key", config.api_key.as_str())])
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(
            event = "gemini_http_error",
            status = status.as_u16(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "gemini_http_error"
        );
        return Err(classify_status(status, &body));
    }

    let raw = response.text().await?;
    let envelope: GenerateContentResponse = serde_json::from_str(&raw)?;
    let text = extract_text(envelope)?;

    tracing::debug!(
        event = "gemini_response_ok",
        chars = text.chars().count(),
        elapsed_ms = start_time.elapsed().as_millis(),
        "gemini_response_ok"
    );
    Ok(text)
}

/// Maps a non-2xx status to an adapter error.
#[must_use]
pub fn classify_status(status: StatusCode, body: &str) -> GeminiError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return GeminiError::RateLimited;
    }
    GeminiError::Http {
        status: status.as_u16(),
        body: truncate(body, MAX_ERROR_BODY).to_string(),
    }
}

/// Pulls the first candidate's first part text out of a decoded envelope.
///
/// An embedded `error` object wins over any candidates. Whitespace-only
/// text counts as empty.
pub fn extract_text(envelope: GenerateContentResponse) -> Result<String, GeminiError> {
    if let Some(error) = envelope.error {
        tracing::error!(
            event = "gemini_api_error",
            code = error.code,
            status = %error.status,
            message = %error.message,
            "gemini_api_error"
        );
        return Err(GeminiError::Api {
            code: error.code,
            message: error.message,
            status: error.status,
        });
    }

    let candidate = envelope
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .ok_or_else(|| {
            GeminiError::EmptyResponse(
                "no candidates in response; the model may have blocked the content".to_string(),
            )
        })?;

    let part = candidate
        .content
        .and_then(|content| content.parts.into_iter().next())
        .ok_or_else(|| GeminiError::EmptyResponse("empty parts array in candidate".to_string()))?;

    let text = part
        .text
        .ok_or_else(|| GeminiError::EmptyResponse("no text in content part".to_string()))?;

    if text.trim().is_empty() {
        return Err(GeminiError::EmptyResponse("blank text in content part".to_string()));
    }

    Ok(text)
}

/// Truncates at a char boundary at or before `max` bytes.
fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
