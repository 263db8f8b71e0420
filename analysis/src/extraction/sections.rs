//! Free-text and bulleted section extraction.

use super::rules::{
    is_known_section_header, SectionRules, FEEDBACK_END_RULES, FEEDBACK_HEADER_RULES,
};

/// Removes markdown emphasis markers.
#[must_use]
pub fn strip_emphasis(text: &str) -> String {
    text.replace('*', "")
}

/// Extracts the general-assessment paragraph.
///
/// For each header in priority order, takes the text after it up to the
/// first end marker (markers are tried in order, the first one found wins)
/// or to the end of the text. Emphasis is stripped and whitespace trimmed;
/// an empty result moves on to the next header. Returns an empty string when
/// nothing usable is found.
#[must_use]
pub fn extract_feedback(text: &str) -> String {
    for (header, language) in FEEDBACK_HEADER_RULES.iter() {
        let Some(found) = header.find(text) else {
            continue;
        };
        let after = &text[found.end()..];

        let end = FEEDBACK_END_RULES
            .iter()
            .find_map(|(marker, _)| marker.find(after))
            .map_or(after.len(), |m| m.start());

        let feedback = strip_emphasis(&after[..end]).trim().to_string();
        if !feedback.is_empty() {
            tracing::trace!(event = "feedback_matched", language = %language, chars = feedback.chars().count(), "feedback_matched");
            return feedback;
        }
    }
    String::new()
}

/// Extracts bullet items of the section described by `rules`.
///
/// Starts after the first matching header variant and walks the following
/// lines:
/// - a bullet (`-`, `•`, or `*` followed by whitespace) yields its text with
///   emphasis stripped, unless the raw item contains `:**`;
/// - a non-bullet line containing `:**`, a non-empty line that contains a
///   colon and is entirely uppercase, or a line opening with any known
///   section header (`Öneriler:`) is the next header and ends the section;
/// - anything else is skipped.
///
/// Returns an empty list when no header matches.
#[must_use]
pub fn extract_list_items(text: &str, rules: &SectionRules) -> Vec<String> {
    let Some(start) = rules.find_section_start(text) else {
        return Vec::new();
    };

    let mut items = Vec::new();
    for line in text[start..].lines() {
        let trimmed = line.trim();

        if let Some(body) = bullet_body(trimmed) {
            if trimmed.contains(":**") {
                continue;
            }
            let item = strip_emphasis(&body).trim().to_string();
            if !item.is_empty() {
                items.push(item);
            }
            continue;
        }

        if is_section_header(trimmed) {
            break;
        }
    }

    tracing::trace!(event = "section_parsed", section = %rules.name(), items = items.len(), "section_parsed");
    items
}

/// Extracts bullet items for ad-hoc `labels`, compiling the header variants
/// on every call. Prefer [`extract_list_items`] with a cached
/// [`SectionRules`] on hot paths.
#[must_use]
pub fn extract_list_items_for(text: &str, labels: &[&str]) -> Vec<String> {
    extract_list_items(text, &SectionRules::new(labels))
}

/// Returns the text after the bullet marker, or `None` for a non-bullet line.
///
/// `* ` is checked on the raw line since stripping emphasis would remove the
/// marker itself. `-` and `•` are checked after stripping so `**- item**`
/// still counts.
fn bullet_body(trimmed: &str) -> Option<String> {
    if let Some(rest) = trimmed.strip_prefix('*') {
        if rest.starts_with(char::is_whitespace) {
            return Some(rest.to_string());
        }
    }

    let plain = strip_emphasis(trimmed);
    let plain = plain.trim_start();
    let mut chars = plain.chars();
    match chars.next() {
        Some('-' | '•') => Some(chars.as_str().to_string()),
        _ => None,
    }
}

fn is_section_header(trimmed: &str) -> bool {
    if trimmed.contains(":**") || is_known_section_header(trimmed) {
        return true;
    }
    let plain = strip_emphasis(trimmed);
    let plain = plain.trim();
    !plain.is_empty() && plain.contains(':') && plain.to_uppercase() == plain
}
