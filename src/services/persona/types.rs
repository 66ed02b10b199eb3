//! Persona Types
//!
//! The two voices of the dialogue engine: a warm interviewer that talks to
//! the user, and a conservative clerk that turns replies into fields.

use serde::{Deserialize, Serialize};

/// Persona roles used in a dialogue turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaRole {
    /// Response generation: asks the next question
    Interviewer,
    /// Extraction: reads the latest reply into candidate fields
    Extractor,
}

impl PersonaRole {
    /// Human-readable display name for the persona.
    pub fn display_name(&self) -> &'static str {
        match self {
            PersonaRole::Interviewer => "Interviewer",
            PersonaRole::Extractor => "Profile Extractor",
        }
    }

    /// Short identifier for the persona (used in logs).
    pub fn id(&self) -> &'static str {
        match self {
            PersonaRole::Interviewer => "interviewer",
            PersonaRole::Extractor => "extractor",
        }
    }
}

impl std::fmt::Display for PersonaRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A persona definition.
#[derive(Debug, Clone)]
pub struct Persona {
    pub role: PersonaRole,
    /// Identity paragraph opening the system prompt
    pub identity_prompt: String,
    /// Tone and conversational manner
    pub conversation_style: String,
    /// Domain knowledge the persona can draw on
    pub expertise: Vec<String>,
}
