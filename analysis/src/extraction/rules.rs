//! Ordered pattern tables used by the extractor.
//!
//! Each table is tried top to bottom and the first rule that matches wins.
//! Supporting another phrasing or language means adding a row.

use super::language::Language;
use regex::Regex;
use std::sync::LazyLock;

/// Score labels, highest priority first. Every pattern captures the digits.
const SCORE_PATTERNS: &[(&str, Language)] = &[
    // **SKOR:** 85
    (r"\*\*SKOR:\*\*\s*([0-9]+)", Language::Turkish),
    // **SCORE:** 85
    (r"\*\*SCORE:\*\*\s*([0-9]+)", Language::English),
    // SKOR: 85, Skor: **85**
    (r"SKOR:[\s*]*([0-9]+)", Language::Turkish),
    // SCORE: 85, Score: 85
    (r"SCORE:[\s*]*([0-9]+)", Language::English),
];

/// Headers that open the general-assessment section.
const FEEDBACK_HEADERS: &[(&str, Language)] = &[
    (r"\*\*GENEL DEĞERLENDİRME:\*\*", Language::Turkish),
    (r"GENEL DEĞERLENDİRME:", Language::Turkish),
    (r"Genel Değerlendirme:", Language::Turkish),
    (r"\*\*GENERAL ASSESSMENT:\*\*", Language::English),
    (r"GENERAL ASSESSMENT:", Language::English),
];

/// Markers that close the general-assessment section.
const FEEDBACK_END_MARKERS: &[(&str, Language)] = &[
    (r"\*\*DOĞRU", Language::Turkish),
    (r"DOĞRU YAPILAN", Language::Turkish),
    // Doğru Yapılan
    (r"doğru yapılan", Language::Turkish),
    (r"\*\*HATA", Language::Turkish),
    (r"\*\*CORRECT", Language::English),
    (r"CORRECT POINTS", Language::English),
    (r"\*\*ERRORS", Language::English),
    (r"\*\*NEEDS CORRECTION", Language::English),
    (r"\*\*SUGGESTIONS", Language::English),
];

/// Labels of the correct-technique section.
pub const CORRECT_POINTS_LABELS: &[&str] = &["DOĞRU YAPILAN", "CORRECT POINTS", "DOĞRU NOKTALAR"];

/// Labels of the errors section.
pub const ERRORS_LABELS: &[&str] = &[
    "HATALAR",
    "DÜZELTİLMESİ GEREKENLER",
    "NEEDS CORRECTION",
    "ERRORS",
];

/// Labels of the suggestions section.
pub const SUGGESTIONS_LABELS: &[&str] = &["ÖNERİLER", "SUGGESTIONS", "TAVSİYELER"];

/// A compiled, case-insensitive pattern tagged with its language.
pub type Rule = (Regex, Language);

#[allow(clippy::expect_used)]
fn compile(table: &[(&str, Language)]) -> Vec<Rule> {
    table
        .iter()
        .map(|(pattern, language)| {
            let regex = Regex::new(&format!("(?i){pattern}")).expect("static pattern compiles");
            (regex, *language)
        })
        .collect()
}

/// Compiled [`SCORE_PATTERNS`].
pub static SCORE_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| compile(SCORE_PATTERNS));

/// Compiled [`FEEDBACK_HEADERS`].
pub static FEEDBACK_HEADER_RULES: LazyLock<Vec<Rule>> =
    LazyLock::new(|| compile(FEEDBACK_HEADERS));

/// Compiled [`FEEDBACK_END_MARKERS`].
pub static FEEDBACK_END_RULES: LazyLock<Vec<Rule>> =
    LazyLock::new(|| compile(FEEDBACK_END_MARKERS));

/// Last-resort score guess: the first run of one to three digits.
#[allow(clippy::expect_used)]
pub static ANY_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{1,3}").expect("static pattern compiles"));

/// Header variants for one bulleted section.
///
/// For every label, in order, the bold form `**LABEL:**`, the plain form
/// `LABEL:` and the lowercase form `label:` are tried. The lowercase form
/// follows Turkish casing (`I` → `ı`, `İ` → `i`) so that `Doğru Yapılan:`
/// and `öneriler:` are found.
#[derive(Debug, Clone)]
pub struct SectionRules {
    name: String,
    headers: Vec<Regex>,
}

impl SectionRules {
    /// Compiles the header variants for `labels`.
    #[must_use]
    pub fn new(labels: &[&str]) -> Self {
        let headers = labels
            .iter()
            .flat_map(|label| {
                let escaped = regex::escape(label);
                let lower = regex::escape(&turkish_lowercase(label));
                [
                    format!(r"(?i)\*\*{escaped}:\*\*"),
                    format!("(?i){escaped}:"),
                    format!("(?i){lower}:"),
                ]
            })
            .filter_map(|pattern| Regex::new(&pattern).ok())
            .collect();

        Self {
            name: labels.first().copied().unwrap_or_default().to_string(),
            headers,
        }
    }

    /// First label, used in log events.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `line` starts with one of the header variants.
    #[must_use]
    pub fn starts_line(&self, line: &str) -> bool {
        self.headers
            .iter()
            .any(|header| header.find(line).is_some_and(|m| m.start() == 0))
    }

    /// Byte offset just past the first header variant that matches.
    #[must_use]
    pub fn find_section_start(&self, text: &str) -> Option<usize> {
        self.headers
            .iter()
            .find_map(|header| header.find(text))
            .map(|m| m.end())
    }
}

fn turkish_lowercase(label: &str) -> String {
    let mut lower = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            'I' => lower.push('ı'),
            'İ' => lower.push('i'),
            _ => lower.extend(c.to_lowercase()),
        }
    }
    lower
}

/// Section rules for correct points.
pub static CORRECT_POINTS_SECTION: LazyLock<SectionRules> =
    LazyLock::new(|| SectionRules::new(CORRECT_POINTS_LABELS));

/// Section rules for errors.
pub static ERRORS_SECTION: LazyLock<SectionRules> =
    LazyLock::new(|| SectionRules::new(ERRORS_LABELS));

/// Section rules for suggestions.
pub static SUGGESTIONS_SECTION: LazyLock<SectionRules> =
    LazyLock::new(|| SectionRules::new(SUGGESTIONS_LABELS));

/// Whether `line` opens any of the known bulleted sections.
#[must_use]
pub fn is_known_section_header(line: &str) -> bool {
    [&CORRECT_POINTS_SECTION, &ERRORS_SECTION, &SUGGESTIONS_SECTION]
        .iter()
        .any(|section| section.starts_line(line))
}
