//! Persona Prompt Builder
//!
//! Builds system prompts for response generation and extraction.

use biographer_core::{schema, Profile};

use super::types::Persona;
use crate::services::biographer::directives::PromptDirective;

/// Build the system prompt for response generation.
///
/// The persona's identity, style and expertise come first, then what the
/// profile already holds, the conversation rules, and finally the
/// directive for this turn.
pub fn build_interviewer_system_prompt(
    persona: &Persona,
    directive: &PromptDirective,
    profile: &Profile,
) -> String {
    let mut parts = Vec::with_capacity(6);

    parts.push(persona.identity_prompt.clone());

    parts.push(format!(
        "\n## Conversation Style\n{}",
        persona.conversation_style
    ));

    if !persona.expertise.is_empty() {
        parts.push(format!(
            "\n## Your Expertise\n{}",
            persona
                .expertise
                .iter()
                .map(|e| format!("- {}", e))
                .collect::<Vec<_>>()
                .join("\n")
        ));
    }

    let known = known_fields(profile);
    parts.push(format!(
        "\n## Already Known\n{}",
        if known.is_empty() {
            "Nothing yet.".to_string()
        } else {
            known
                .iter()
                .map(|(label, value)| format!("- {}: {}", label, value))
                .collect::<Vec<_>>()
                .join("\n")
        }
    ));

    parts.push(
        "\n## Rules\n\
         1. Never ask again for anything listed under Already Known.\n\
         2. Ask exactly one question in this message.\n\
         3. Vary your phrasing. Do not open every message with the same acknowledgement (\"Great!\", \"Thank you!\").\n\
         4. Keep the whole message under 60 words."
            .to_string(),
    );

    let mut task = format!("Topic: {}\n{}", directive.topic, directive.guidance);
    if !directive.hints.is_empty() {
        task.push_str("\nYou may offer these options:\n");
        task.push_str(
            &directive
                .hints
                .iter()
                .map(|h| format!("- {}", h))
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }
    parts.push(format!("\n## Your Task\n{}", task));

    parts.join("\n")
}

/// Build the system prompt for the extraction call.
pub fn build_extraction_system_prompt(persona: &Persona, field_names: &[&str]) -> String {
    format!(
        r#"{identity}

{style}

## Rules
1. Output ONLY a JSON object. No markdown fences, no explanatory text.
2. Keys must come from the field list below. Omit every field the reply does not state.
3. Record only what is explicitly said. Do not infer gender from names, diet from community, or anything similar.
4. Use an array of strings for spiritual_org. Use plain strings for everything else except age, which is a number.
5. Copy dates as written; do not convert or complete them.
6. If the reply states nothing usable, output {{}}.

## Fields
{fields}"#,
        identity = persona.identity_prompt,
        style = persona.conversation_style,
        fields = field_names.join(", "),
    )
}

/// Build the user message for the extraction call.
pub fn build_extraction_user_message(prior_question: Option<&str>, reply: &str) -> String {
    format!(
        "Question that was asked:\n{}\n\nUser's reply:\n{}",
        prior_question.unwrap_or("(none, this is the opening message)"),
        reply
    )
}

/// `(label, value)` for every asked field already complete, in canonical order
fn known_fields(profile: &Profile) -> Vec<(&'static str, String)> {
    schema::ordered_fields()
        .iter()
        .filter(|spec| spec.is_filled(profile.get(spec.name)))
        .filter_map(|spec| profile.display(spec.name).map(|v| (spec.label, v)))
        .collect()
}
