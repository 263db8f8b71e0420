//! Discovery and resolution of the Gemini API key.

use crate::error::GeminiError;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

/// Locates the Gemini API key.
///
/// Resolution order:
/// 1. `explicit_key` if provided and non-empty.
/// 2. The `GEMINI_API_KEY` environment variable, if non-empty.
///
/// # Errors
///
/// Returns `GeminiError::MissingApiKey` when neither source yields a key.
pub fn resolve_api_key(explicit_key: Option<String>) -> Result<String, GeminiError> {
    if let Some(key) = explicit_key {
        let key = key.trim().to_string();
        if !key.is_empty() {
            return Ok(key);
        }
    }

    match std::env::var(API_KEY_ENV_VAR) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(GeminiError::MissingApiKey(API_KEY_ENV_VAR)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_key_wins() {
        assert_eq!(
            resolve_api_key(Some("  abc  ".to_string())).unwrap(),
            "abc"
        );
    }
}
