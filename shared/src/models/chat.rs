//! Chat support models and the topic policy applied to every question

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Directive sent ahead of every user question
pub const FARMING_ASSISTANT_DIRECTIVE: &str =
    "You are a Farming Assistant. Give expert advice ONLY about \
agriculture, crops, farming methods, soil, irrigation, fertilizer, pest control, \
weather effects on crops, and yield improvement. If the user asks about anything \
unrelated to farming, politely decline and guide them back to agriculture topics.";

/// A validated chat request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub lang: String,
    pub user_id: String,
}

/// Two-part prompt handed to the completion backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptFrame {
    /// Topic restriction directive
    pub system: String,
    /// The user turn, `Language: {lang}\nUser: {message}`
    pub user: String,
}

impl PromptFrame {
    /// Frame a question under the farming-only policy
    pub fn wrap(message: &str, lang: &str) -> Result<Self, ValidationError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        Ok(Self {
            system: FARMING_ASSISTANT_DIRECTIVE.to_string(),
            user: format!("Language: {}\nUser: {}", lang, message),
        })
    }
}

/// Reply returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResult {
    pub reply: String,
}

impl ChatResult {
    /// Package a raw completion. Only surrounding whitespace is removed.
    pub fn unwrap_reply(raw_reply: &str) -> Self {
        Self {
            reply: raw_reply.trim().to_string(),
        }
    }
}

/// Chat exchange as handed to the persistence sink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRecord {
    pub user: String,
    pub message: String,
    pub reply: String,
    pub lang: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatRecord {
    pub fn new(request: &ChatRequest, result: &ChatResult) -> Self {
        Self {
            user: request.user_id.clone(),
            message: request.message.clone(),
            reply: result.reply.clone(),
            lang: request.lang.clone(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_formats_user_turn() {
        let frame = PromptFrame::wrap("  How deep should I plant maize?  ", "Hindi").unwrap();
        assert_eq!(frame.user, "Language: Hindi\nUser: How deep should I plant maize?");
        assert_eq!(frame.system, FARMING_ASSISTANT_DIRECTIVE);
    }

    #[test]
    fn test_wrap_rejects_blank_message() {
        assert_eq!(PromptFrame::wrap("", "English"), Err(ValidationError::EmptyMessage));
        assert_eq!(
            PromptFrame::wrap(" \n\t ", "English"),
            Err(ValidationError::EmptyMessage)
        );
    }

    #[test]
    fn test_directive_covers_policy_topics() {
        for topic in [
            "agriculture",
            "crops",
            "soil",
            "irrigation",
            "fertilizer",
            "pest control",
            "weather",
            "yield",
            "politely decline",
        ] {
            assert!(FARMING_ASSISTANT_DIRECTIVE.contains(topic), "missing {}", topic);
        }
    }

    #[test]
    fn test_unwrap_trims_only() {
        let result = ChatResult::unwrap_reply("\n  Use **neem oil** for aphids.\n\n");
        assert_eq!(result.reply, "Use **neem oil** for aphids.");
    }

    #[test]
    fn test_wrap_keeps_inner_whitespace() {
        let frame = PromptFrame::wrap("When to sow\nwheat?", "English").unwrap();
        assert_eq!(frame.user, "Language: English\nUser: When to sow\nwheat?");
    }
}
