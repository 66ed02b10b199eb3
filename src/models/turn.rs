//! Turn Models
//!
//! Request and response shapes for one dialogue turn. The engine keeps no
//! session state: every request carries the full history and the caller's
//! current profile snapshot.

use biographer_core::Profile;
use biographer_llm::Message;
use serde::{Deserialize, Serialize};

/// Who sent a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message of the dialogue history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}

impl From<&ChatMessage> for Message {
    fn from(msg: &ChatMessage) -> Self {
        match msg.role {
            ChatRole::User => Message::user(msg.text.clone()),
            ChatRole::Assistant => Message::assistant(msg.text.clone()),
        }
    }
}

/// Input of a dialogue turn
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnRequest {
    #[serde(default)]
    pub message_history: Vec<ChatMessage>,
    #[serde(default)]
    pub current_profile: Profile,
}

impl TurnRequest {
    /// The user's reply this turn, when the history ends with one
    pub fn latest_user_reply(&self) -> Option<&str> {
        self.message_history
            .last()
            .filter(|m| m.role == ChatRole::User)
            .map(|m| m.text.as_str())
    }

    /// The assistant question the latest reply answers
    pub fn prior_question(&self) -> Option<&str> {
        let len = self.message_history.len();
        if len < 2 {
            return None;
        }
        self.message_history[..len - 1]
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::Assistant)
            .map(|m| m.text.as_str())
    }
}

/// Why a candidate value was not written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Null, empty or a placeholder token
    Placeholder,
    /// Key is not a schema field
    UnknownField,
    /// Date without separators or not a real calendar date
    UnparseableDate,
    /// Bare birth year, recorded as age instead
    YearConvertedToAge,
    /// Numeric field without a leading integer
    NotANumber,
    /// Numeric value outside the plausible range
    OutOfRange,
    /// Fragment already present in an accumulator or set field
    Duplicate,
    /// Value shape the field cannot hold (e.g. an object)
    UnsupportedShape,
}

/// Diagnostic entry for a dropped candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedField {
    pub field: String,
    pub reason: RejectionReason,
}

impl RejectedField {
    pub fn new(field: impl Into<String>, reason: RejectionReason) -> Self {
        Self {
            field: field.into(),
            reason,
        }
    }
}

/// Output of a dialogue turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    pub assistant_reply: String,
    pub updated_profile: Profile,
    pub is_complete: bool,
    /// Field the reply asks about; `None` once complete
    #[serde(default)]
    pub next_field: Option<String>,
    /// Share of asked fields complete, 0-100
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub rejected: Vec<RejectedField>,
}
