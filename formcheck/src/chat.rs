//! Coaching chat prompt composition.

use chrono::{DateTime, Utc};
use formcheck_analysis::extraction::Language;
use serde::{Deserialize, Serialize};

/// Who said a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The athlete.
    User,
    /// The model.
    Assistant,
}

/// One prior turn of a coaching conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Speaker.
    pub role: ChatRole,
    /// What was said.
    pub text: String,
    /// When it was said.
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    /// A user turn stamped now.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text)
    }

    /// An assistant turn stamped now.
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, text)
    }

    /// A turn stamped now.
    #[must_use]
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

struct PromptLabels {
    context: &'static str,
    history: &'static str,
    user: &'static str,
    assistant: &'static str,
}

const fn prompt_labels(language: Language) -> PromptLabels {
    match language {
        Language::Turkish => PromptLabels {
            context: "Analiz Bağlamı",
            history: "Geçmiş Konuşma",
            user: "Kullanıcı",
            assistant: "Asistan",
        },
        Language::English => PromptLabels {
            context: "Analysis Context",
            history: "Conversation History",
            user: "User",
            assistant: "Assistant",
        },
    }
}

/// Composes the single prompt sent for a chat message.
///
/// Layout: the analysis context, the prior turns (omitted when there are
/// none), the new user message, then an empty assistant cue for the model
/// to complete.
#[must_use]
pub fn build_chat_prompt(
    user_message: &str,
    history: &[ChatTurn],
    analysis_context: &str,
    language: Language,
) -> String {
    let labels = prompt_labels(language);
    let mut parts: Vec<String> = Vec::with_capacity(history.len() + 4);

    parts.push(format!("{}:\n{analysis_context}\n", labels.context));

    if !history.is_empty() {
        parts.push(format!("{}:", labels.history));
        for turn in history {
            let role = match turn.role {
                ChatRole::User => labels.user,
                ChatRole::Assistant => labels.assistant,
            };
            parts.push(format!("{role}: {}", turn.text));
        }
    }

    parts.push(format!("\n{}: {user_message}\n", labels.user));
    parts.push(format!("{}:", labels.assistant));

    parts.join("\n")
}
