//! Score lookup.

use super::rules::SCORE_RULES;

/// Finds the form score in `text`.
///
/// Tries each score label in priority order and parses the digits of the
/// first one that matches. Returns `0` when no label matches; a label whose
/// digits do not fit a `u32` is skipped. The value is not clamped here.
#[must_use]
pub fn extract_score(text: &str) -> u32 {
    for (rule, language) in SCORE_RULES.iter() {
        let Some(found) = rule.find(text) else {
            continue;
        };

        let digits: String = found
            .as_str()
            .chars()
            .filter(char::is_ascii_digit)
            .collect();

        match digits.parse::<u32>() {
            Ok(score) => {
                tracing::trace!(event = "score_matched", language = %language, score, "score_matched");
                return score;
            }
            Err(e) => {
                tracing::debug!(event = "score_unparsable", digits = %digits, error = %e, "score_unparsable");
            }
        }
    }
    0
}
