//! Structured analysis outcome.

use super::language::Language;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Form analysis extracted from one model response.
///
/// Values produced by [`extract_analysis`](super::extract_analysis) always
/// have a score in `0..=100`, non-empty feedback and at least one entry in
/// each list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Overall form score, `0..=100`.
    pub score: u8,
    /// General assessment paragraph.
    pub feedback: String,
    /// What the athlete did well.
    pub correct_points: Vec<String>,
    /// What needs correcting.
    pub errors: Vec<String>,
    /// Coaching suggestions.
    pub suggestions: Vec<String>,
}

/// Coarse band a score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLevel {
    /// 0 to 49.
    Poor,
    /// 50 to 69.
    NeedsImprovement,
    /// 70 to 84.
    Good,
    /// 85 to 100.
    Excellent,
}

impl ScoreLevel {
    /// Band for `score`. Values above 100 count as excellent.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            0..=49 => Self::Poor,
            50..=69 => Self::NeedsImprovement,
            70..=84 => Self::Good,
            _ => Self::Excellent,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Poor, Language::Turkish) => "Zayıf",
            (Self::NeedsImprovement, Language::Turkish) => "Geliştirilmeli",
            (Self::Good, Language::Turkish) => "İyi",
            (Self::Excellent, Language::Turkish) => "Mükemmel",
            (Self::Poor, Language::English) => "Poor",
            (Self::NeedsImprovement, Language::English) => "Needs improvement",
            (Self::Good, Language::English) => "Good",
            (Self::Excellent, Language::English) => "Excellent",
        }
    }
}

struct SummaryLabels {
    exercise: &'static str,
    score: &'static str,
    assessment: &'static str,
    correct_points: &'static str,
    errors: &'static str,
    suggestions: &'static str,
}

const fn summary_labels(language: Language) -> SummaryLabels {
    match language {
        Language::Turkish => SummaryLabels {
            exercise: "Egzersiz",
            score: "Skor",
            assessment: "Genel Değerlendirme",
            correct_points: "Doğru Yapılan",
            errors: "Hatalar",
            suggestions: "Öneriler",
        },
        Language::English => SummaryLabels {
            exercise: "Exercise",
            score: "Score",
            assessment: "General Assessment",
            correct_points: "Correct Points",
            errors: "Errors",
            suggestions: "Suggestions",
        },
    }
}

impl AnalysisResult {
    /// Band of this result's score.
    #[must_use]
    pub const fn level(&self) -> ScoreLevel {
        ScoreLevel::from_score(self.score)
    }

    /// Renders the analysis as plain text for use as chat context.
    ///
    /// Empty lists are left out.
    #[must_use]
    pub fn context_summary(&self, exercise_name: &str, language: Language) -> String {
        let labels = summary_labels(language);
        let mut out = format!(
            "{}: {exercise_name}\n{}: {}/100\n\n{}:\n{}",
            labels.exercise, labels.score, self.score, labels.assessment, self.feedback
        );

        for (heading, items) in [
            (labels.correct_points, &self.correct_points),
            (labels.errors, &self.errors),
            (labels.suggestions, &self.suggestions),
        ] {
            if items.is_empty() {
                continue;
            }
            let _ = write!(out, "\n\n{heading}:");
            for item in items {
                let _ = write!(out, "\n- {item}");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnalysisResult {
        AnalysisResult {
            score: 82,
            feedback: "Solid squat.".into(),
            correct_points: vec!["Neutral spine".into()],
            errors: vec![],
            suggestions: vec!["Slow the descent".into(), "Brace".into()],
        }
    }

    #[test]
    fn test_score_levels() {
        assert_eq!(ScoreLevel::from_score(0), ScoreLevel::Poor);
        assert_eq!(ScoreLevel::from_score(49), ScoreLevel::Poor);
        assert_eq!(ScoreLevel::from_score(50), ScoreLevel::NeedsImprovement);
        assert_eq!(ScoreLevel::from_score(69), ScoreLevel::NeedsImprovement);
        assert_eq!(ScoreLevel::from_score(70), ScoreLevel::Good);
        assert_eq!(ScoreLevel::from_score(84), ScoreLevel::Good);
        assert_eq!(ScoreLevel::from_score(85), ScoreLevel::Excellent);
        assert_eq!(ScoreLevel::from_score(100), ScoreLevel::Excellent);
        assert_eq!(sample().level(), ScoreLevel::Good);
    }

    #[test]
    fn test_score_level_labels() {
        let levels = [
            ScoreLevel::Poor,
            ScoreLevel::NeedsImprovement,
            ScoreLevel::Good,
            ScoreLevel::Excellent,
        ];
        let turkish: Vec<_> = levels.iter().map(|l| l.label(Language::Turkish)).collect();
        let english: Vec<_> = levels.iter().map(|l| l.label(Language::English)).collect();
        assert_eq!(turkish, ["Zayıf", "Geliştirilmeli", "İyi", "Mükemmel"]);
        assert_eq!(english, ["Poor", "Needs improvement", "Good", "Excellent"]);
    }

    #[test]
    fn test_context_summary_english() {
        let summary = sample().context_summary("Squat", Language::English);
        assert_eq!(
            summary,
            "Exercise: Squat\nScore: 82/100\n\nGeneral Assessment:\nSolid squat.\n\n\
             Correct Points:\n- Neutral spine\n\nSuggestions:\n- Slow the descent\n- Brace"
        );
    }

    #[test]
    fn test_context_summary_turkish_headings() {
        let summary = sample().context_summary("Squat", Language::Turkish);
        assert!(summary.starts_with("Egzersiz: Squat\nSkor: 82/100\n\nGenel Değerlendirme:\n"));
        assert!(summary.contains("\n\nDoğru Yapılan:\n- Neutral spine"));
        assert!(!summary.contains("Hatalar:"));
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["correctPoints"][0], "Neutral spine");
        let back: AnalysisResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }
}
