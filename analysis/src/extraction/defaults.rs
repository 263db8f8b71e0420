//! Localized fallback texts and the unparsable-response heuristic.

use super::language::Language;
use super::rules::ANY_NUMBER;

/// Score used when an unparsable response contains no number at all.
pub const NEUTRAL_SCORE: u32 = 50;

/// Fallback texts for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultTexts {
    /// Feedback for a response where nothing could be extracted.
    pub unparsable_feedback: &'static str,
    /// Feedback when the assessment section is missing or empty.
    pub empty_feedback: &'static str,
    /// Placeholder for an empty correct-points list.
    pub correct_point: &'static str,
    /// Placeholder for an empty errors list.
    pub error: &'static str,
    /// Placeholder for an empty suggestions list.
    pub suggestion: &'static str,
}

const TURKISH: DefaultTexts = DefaultTexts {
    unparsable_feedback: "Video analizi tamamlandı. Detayları aşağıda görebilirsiniz.",
    empty_feedback: "Analiz tamamlandı.",
    correct_point: "Form genel olarak iyi",
    error: "Küçük düzeltmeler yapılabilir",
    suggestion: "Düzenli pratik yapın",
};

const ENGLISH: DefaultTexts = DefaultTexts {
    unparsable_feedback: "Video analysis completed. See the details below.",
    empty_feedback: "Analysis completed.",
    correct_point: "Overall form looks good",
    error: "Minor adjustments can be made",
    suggestion: "Practice regularly",
};

impl DefaultTexts {
    /// Returns the fallback texts for `language`.
    #[must_use]
    pub const fn for_language(language: Language) -> &'static Self {
        match language {
            Language::Turkish => &TURKISH,
            Language::English => &ENGLISH,
        }
    }
}

/// Rescues a response nothing could be extracted from.
///
/// Applies only when the score is `0`, the feedback is empty and no correct
/// points were found. The score then becomes the first one-to-three digit run
/// anywhere in `raw` (or [`NEUTRAL_SCORE`]), and the feedback a generic
/// completion message. Otherwise the inputs pass through unchanged.
#[must_use]
pub fn validate_and_default(
    score: u32,
    feedback: String,
    correct_points: usize,
    raw: &str,
    language: Language,
) -> (u32, String) {
    if score != 0 || !feedback.is_empty() || correct_points != 0 {
        return (score, feedback);
    }

    let guessed = ANY_NUMBER
        .find(raw)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(NEUTRAL_SCORE);

    tracing::warn!(
        event = "analysis_unparsable",
        language = %language,
        guessed_score = guessed,
        raw_chars = raw.chars().count(),
        "analysis_unparsable"
    );

    (
        guessed,
        DefaultTexts::for_language(language)
            .unparsable_feedback
            .to_string(),
    )
}
