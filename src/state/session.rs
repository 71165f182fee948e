//! Per-sender conversation session
//!
//! A session tracks how far a sender has progressed through the survey.
//! Sessions live only in process memory and are removed as soon as the
//! flow completes, so a sender always starts fresh on their next contact.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Reserved answers key for the respondent's name
pub const NAME_KEY: &str = "name";

/// Coarse phase of a conversation
///
/// Modeled as a tagged variant so that invalid combinations (e.g. awaiting
/// free text before any question was presented) are unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Session was just created; the next message is the sender's name
    AwaitingName,
    /// Walking the question catalog
    Answering {
        /// Index of the NEXT question to present; the question at
        /// `step - 1` is the one currently awaiting an answer
        step: usize,
        /// Set when the sender picked the "other suggestion" option and
        /// the next message is recorded verbatim
        awaiting_free_text: bool,
    },
    /// Catalog exhausted; answers are ready for submission
    Complete,
}

/// Per-sender mutable conversation progress record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque sender identifier from the messaging platform
    pub sender: String,
    pub stage: Stage,
    /// Collected answers keyed by form field id, plus the reserved
    /// [`NAME_KEY`] entry
    pub answers: HashMap<String, String>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session for a sender, awaiting their name
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            stage: Stage::AwaitingName,
            answers: HashMap::new(),
            updated_at: Utc::now(),
        }
    }

    /// Record an answer
    pub fn set_answer(&mut self, key: &str, value: impl Into<String>) {
        self.answers.insert(key.to_string(), value.into());
        self.updated_at = Utc::now();
    }

    /// Get a recorded answer
    pub fn answer(&self, key: &str) -> Option<&str> {
        self.answers.get(key).map(String::as_str)
    }

    /// Move to a new stage
    pub fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = Session::new("whatsapp:+5511999990000");
        assert_eq!(session.sender, "whatsapp:+5511999990000");
        assert_eq!(session.stage, Stage::AwaitingName);
        assert!(session.answers.is_empty());
    }

    #[test]
    fn test_answer_operations() {
        let mut session = Session::new("whatsapp:+5511999990000");
        session.set_answer(NAME_KEY, "Maria");
        session.set_answer("123", "mais leitos");

        assert_eq!(session.answer(NAME_KEY), Some("Maria"));
        assert_eq!(session.answer("123"), Some("mais leitos"));
        assert_eq!(session.answer("456"), None);
    }

    #[test]
    fn test_stage_transitions() {
        let mut session = Session::new("whatsapp:+5511999990000");
        session.set_stage(Stage::Answering { step: 1, awaiting_free_text: false });
        assert_eq!(session.stage, Stage::Answering { step: 1, awaiting_free_text: false });

        session.set_stage(Stage::Complete);
        assert_eq!(session.stage, Stage::Complete);
    }
}
