//! Response language selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Response language understood by the extractor.
///
/// Selects fallback texts and prompt labels; the extraction rules themselves
/// always try every language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Turkish (`tr`), the default.
    #[default]
    Turkish,
    /// English (`en`).
    English,
}

impl Language {
    /// Parses a language tag. Tags starting with `en` are English; anything
    /// else, including an empty tag, is Turkish.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().to_lowercase().starts_with("en") {
            Self::English
        } else {
            Self::Turkish
        }
    }

    /// Two-letter tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Turkish => "tr",
            Self::English => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
