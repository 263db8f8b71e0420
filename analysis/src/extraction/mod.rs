//! Tolerant extraction of form analyses from free-text model responses.
//!
//! The model is asked for a fixed layout (score, general assessment, then
//! bulleted correct points, errors and suggestions) but in practice mixes
//! Turkish and English labels, markdown emphasis and bullet styles. This
//! module recovers what it can and fills the rest with localized defaults:
//!
//! - [`extract_analysis`] - Full pipeline, never fails
//! - [`extract_score`], [`extract_feedback`], [`extract_list_items`] - Individual passes
//! - [`validate_and_default`] - Last-resort rescue of unparsable text
//! - [`rules`] - Ordered pattern tables driving every pass

/// Localized fallbacks and the unparsable-text rescue.
pub mod defaults;
/// Response language.
pub mod language;
/// The extracted analysis and its score bands.
pub mod result;
/// Ordered pattern tables.
pub mod rules;
/// Score extraction.
pub mod score;
/// Feedback and bulleted-section extraction.
pub mod sections;

pub use defaults::{validate_and_default, DefaultTexts};
pub use language::Language;
pub use result::{AnalysisResult, ScoreLevel};
pub use rules::SectionRules;
pub use score::extract_score;
pub use sections::{extract_feedback, extract_list_items, extract_list_items_for};

use rules::{CORRECT_POINTS_SECTION, ERRORS_SECTION, SUGGESTIONS_SECTION};

/// Turns a raw model response into an [`AnalysisResult`].
///
/// The score is clamped to `0..=100`, empty feedback and empty lists receive
/// the localized defaults for `language`. Deterministic; running it twice on
/// the same input gives the same result.
#[must_use]
pub fn extract_analysis(text: &str, language: Language) -> AnalysisResult {
    tracing::debug!(event = "extraction_started", language = %language, chars = text.chars().count(), "extraction_started");

    let score = extract_score(text);
    let feedback = extract_feedback(text);
    let mut correct_points = extract_list_items(text, &CORRECT_POINTS_SECTION);
    let mut errors = extract_list_items(text, &ERRORS_SECTION);
    let mut suggestions = extract_list_items(text, &SUGGESTIONS_SECTION);

    let (score, mut feedback) =
        validate_and_default(score, feedback, correct_points.len(), text, language);

    let defaults = DefaultTexts::for_language(language);
    if feedback.is_empty() {
        feedback = defaults.empty_feedback.to_string();
    }
    if correct_points.is_empty() {
        correct_points.push(defaults.correct_point.to_string());
    }
    if errors.is_empty() {
        errors.push(defaults.error.to_string());
    }
    if suggestions.is_empty() {
        suggestions.push(defaults.suggestion.to_string());
    }

    #[allow(clippy::cast_possible_truncation)]
    let score = score.min(100) as u8;

    tracing::debug!(
        event = "extraction_finished",
        score,
        correct_points = correct_points.len(),
        errors = errors.len(),
        suggestions = suggestions.len(),
        "extraction_finished"
    );

    AnalysisResult {
        score,
        feedback,
        correct_points,
        errors,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turkish_full_response() {
        let text = "**SKOR:** 78\n\n**GENEL DEĞERLENDİRME:** İyi form.\n\n\
                    **DOĞRU YAPILAN:**\n- Sırt düz\n\n**HATALAR:**\n- Dizler içe\n\n\
                    **ÖNERİLER:**\n- Yavaşla";
        let result = extract_analysis(text, Language::Turkish);
        assert_eq!(result.score, 78);
        assert_eq!(result.feedback, "İyi form.");
        assert_eq!(result.correct_points, vec!["Sırt düz"]);
        assert_eq!(result.errors, vec!["Dizler içe"]);
        assert_eq!(result.suggestions, vec!["Yavaşla"]);
    }

    #[test]
    fn test_empty_text_gets_all_defaults() {
        let result = extract_analysis("", Language::English);
        let defaults = DefaultTexts::for_language(Language::English);
        assert_eq!(result.score, 50);
        assert_eq!(result.feedback, defaults.unparsable_feedback);
        assert_eq!(result.correct_points, vec![defaults.correct_point]);
        assert_eq!(result.errors, vec![defaults.error]);
        assert_eq!(result.suggestions, vec![defaults.suggestion]);
    }

    #[test]
    fn test_score_only_keeps_score_and_uses_empty_feedback_default() {
        let result = extract_analysis("SCORE: 64", Language::English);
        assert_eq!(result.score, 64);
        assert_eq!(result.feedback, "Analysis completed.");
    }

    #[test]
    fn test_score_clamped() {
        assert_eq!(extract_analysis("SKOR: 150", Language::Turkish).score, 100);
    }
}
