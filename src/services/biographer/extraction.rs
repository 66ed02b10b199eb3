//! Extraction Adapter
//!
//! Asks the oracle to turn the latest user reply into candidate fields.
//! Every failure (unreachable oracle, timeout, unparseable payload) yields an
//! empty candidate map; the turn then proceeds on the unmodified profile.

use std::sync::Arc;
use std::time::Duration;

use biographer_core::schema;
use biographer_llm::provider::send_with_timeout;
use biographer_llm::{LlmProvider, LlmRequestOptions, Message};
use serde_json::Value;
use tracing::{debug, warn};

use super::sanitizer::CandidateFields;
use crate::services::persona::{
    build_extraction_system_prompt, build_extraction_user_message, PersonaRegistry, PersonaRole,
};

pub struct ExtractionAdapter {
    provider: Arc<dyn LlmProvider>,
    timeout: Duration,
    temperature: f32,
}

impl ExtractionAdapter {
    pub fn new(provider: Arc<dyn LlmProvider>, timeout: Duration, temperature: f32) -> Self {
        Self {
            provider,
            timeout,
            temperature,
        }
    }

    /// Candidate fields stated in `reply`. Empty on any failure.
    pub async fn extract(&self, prior_question: Option<&str>, reply: &str) -> CandidateFields {
        let persona = PersonaRegistry::get(PersonaRole::Extractor, "");
        let system = build_extraction_system_prompt(&persona, &schema::field_names());
        let user = build_extraction_user_message(prior_question, reply);

        let options = LlmRequestOptions {
            json_response: true,
            ..LlmRequestOptions::with_temperature(self.temperature)
        };

        let response = match send_with_timeout(
            self.provider.as_ref(),
            vec![Message::user(user)],
            Some(system),
            options,
            self.timeout,
        )
        .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "Extraction failed, continuing with no fields");
                return CandidateFields::new();
            }
        };

        match parse_candidates(response.text()) {
            Some(candidates) => {
                debug!(fields = candidates.len(), "Extraction produced candidates");
                candidates
            }
            None => {
                warn!(
                    response_len = response.text().len(),
                    "Extraction payload was not a JSON object, continuing with no fields"
                );
                CandidateFields::new()
            }
        }
    }
}

/// Parse an oracle payload into a candidate map. Only a JSON object counts.
pub fn parse_candidates(text: &str) -> Option<CandidateFields> {
    let json = extract_json_from_response(text);
    match serde_json::from_str::<Value>(&json) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            debug!(error = %e, "Extraction payload did not parse");
            None
        }
    }
}

/// Extract JSON from an oracle response string, handling markdown fences.
fn extract_json_from_response(text: &str) -> String {
    let trimmed = text.trim();

    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        let content_start = after_fence.find('\n').map(|nl| nl + 1).unwrap_or(0);
        let content = &after_fence[content_start..];
        if let Some(end) = content.find("```") {
            return content[..end].trim().to_string();
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start <= end {
            return trimmed[start..=end].to_string();
        }
    }

    trimmed.to_string()
}
