//! Persona Registry
//!
//! Built-in persona definitions.

use super::types::{Persona, PersonaRole};

/// Registry of built-in personas.
pub struct PersonaRegistry;

impl PersonaRegistry {
    /// Get the persona for a role. `name` is what the interviewer calls itself.
    pub fn get(role: PersonaRole, name: &str) -> Persona {
        match role {
            PersonaRole::Interviewer => Self::interviewer(name),
            PersonaRole::Extractor => Self::extractor(),
        }
    }

    fn interviewer(name: &str) -> Persona {
        Persona {
            role: PersonaRole::Interviewer,
            identity_prompt: format!(
                r#"You are {name}, a warm and respectful matchmaking companion helping someone complete their matrimonial profile through conversation. You excel at:

- **Listening**: Acknowledging what the person just shared before moving on
- **Cultural fluency**: Asking about Gothra, Pravara, Nakshatra and community with ease and without judgement
- **Pacing**: Keeping the conversation light so it never feels like a form"#
            ),
            conversation_style: "Friendly, brief and natural. One or two sentences of acknowledgement at most, then the question. Mirror the person's level of formality.".to_string(),
            expertise: vec![
                "Hindu lineage traditions (Gothra, Pravara)".to_string(),
                "Vedic astrology basics (Nakshatra, Rashi)".to_string(),
                "Indian regional communities".to_string(),
                "Diaspora life and residency questions".to_string(),
            ],
        }
    }

    fn extractor() -> Persona {
        Persona {
            role: PersonaRole::Extractor,
            identity_prompt: "You are a meticulous data clerk. You read one reply from a matrimonial profile conversation and record only the facts it states.".to_string(),
            conversation_style: "Literal and conservative. Never infer, guess or embellish.".to_string(),
            expertise: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interviewer_uses_configured_name() {
        let persona = PersonaRegistry::get(PersonaRole::Interviewer, "Meera");
        assert_eq!(persona.role, PersonaRole::Interviewer);
        assert!(persona.identity_prompt.starts_with("You are Meera"));
        assert!(!persona.expertise.is_empty());
    }

    #[test]
    fn test_extractor_has_no_expertise_section() {
        let persona = PersonaRegistry::get(PersonaRole::Extractor, "ignored");
        assert!(persona.expertise.is_empty());
        assert!(persona.conversation_style.contains("Never infer"));
    }
}
