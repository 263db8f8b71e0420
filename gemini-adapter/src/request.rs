//! Request body builders for `generateContent` calls.

use crate::types::{Content, GenerateContentRequest, Part};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Encodes a media payload as standard base64.
///
/// This is CPU-bound for large videos; async callers should run it on a
/// blocking worker.
#[must_use]
pub fn encode_media(media: &[u8]) -> String {
    BASE64.encode(media)
}

/// Builds a prompt-plus-media request from an already-encoded payload.
///
/// The prompt is the first part and the media the second, both inside one
/// content unit.
#[must_use]
pub fn build_analysis_request_encoded(
    prompt: &str,
    encoded_media: String,
    mime_type: &str,
) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part::text(prompt), Part::inline(mime_type, encoded_media)],
        }],
    }
}

/// Builds a prompt-plus-media request, encoding `media` inline.
#[must_use]
pub fn build_analysis_request(
    media: &[u8],
    prompt: &str,
    mime_type: &str,
) -> GenerateContentRequest {
    build_analysis_request_encoded(prompt, encode_media(media), mime_type)
}

/// Builds a text-only request with a single part.
#[must_use]
pub fn build_text_request(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part::text(prompt)],
        }],
    }
}
