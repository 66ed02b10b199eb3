//! Turn Orchestrator
//!
//! One dialogue turn: extraction, sanitization, direction, then response
//! generation. Holds no per-user state; everything comes in with the request.

use std::sync::Arc;
use std::time::Duration;

use biographer_core::schema;
use biographer_core::Profile;
use biographer_knowledge::KnowledgeBase;
use biographer_llm::provider::{check_with_timeout, send_with_timeout};
use biographer_llm::{LlmProvider, LlmRequestOptions, Message};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::director::Director;
use super::directives::{DirectiveTarget, PromptDirective};
use super::extraction::ExtractionAdapter;
use super::sanitizer::{sanitize, CandidateFields};
use crate::models::settings::BiographerConfig;
use crate::models::turn::{TurnRequest, TurnResponse};
use crate::services::persona::{build_interviewer_system_prompt, Persona, PersonaRegistry, PersonaRole};
use crate::utils::error::{AppError, AppResult};

/// Stand-in user message when the history is empty
const OPENING_MESSAGE: &str = "Hello";

pub struct TurnOrchestrator {
    provider: Arc<dyn LlmProvider>,
    extraction: ExtractionAdapter,
    director: Director,
    persona: Persona,
    response_timeout: Duration,
    response_temperature: f32,
}

impl TurnOrchestrator {
    pub fn new(
        config: &BiographerConfig,
        provider: Arc<dyn LlmProvider>,
        knowledge: Arc<KnowledgeBase>,
    ) -> Self {
        Self {
            extraction: ExtractionAdapter::new(
                provider.clone(),
                config.extraction_timeout(),
                config.extraction_temperature,
            ),
            director: Director::new(knowledge),
            persona: PersonaRegistry::get(PersonaRole::Interviewer, &config.persona_name),
            provider,
            response_timeout: config.response_timeout(),
            response_temperature: config.response_temperature,
        }
    }

    pub fn director(&self) -> &Director {
        &self.director
    }

    /// Probe the oracle within the response deadline. Turns never call this;
    /// they degrade instead of failing.
    pub async fn check_oracle(&self) -> AppResult<()> {
        check_with_timeout(self.provider.as_ref(), self.response_timeout).await?;
        info!(
            provider = self.provider.name(),
            model = self.provider.model(),
            "Oracle reachable"
        );
        Ok(())
    }

    /// Run one turn against the caller's snapshot. `today` anchors date guards.
    pub async fn run_turn(&self, request: &TurnRequest, today: NaiveDate) -> AppResult<TurnResponse> {
        validate_request(request)?;

        let candidates = match request.latest_user_reply() {
            Some(reply) => {
                self.extraction
                    .extract(request.prior_question(), reply)
                    .await
            }
            None => {
                debug!("No user reply to extract from");
                CandidateFields::new()
            }
        };

        let outcome = sanitize(&request.current_profile, &candidates, today);
        if !outcome.rejected.is_empty() {
            debug!(rejected = outcome.rejected.len(), "Sanitizer dropped candidates");
        }

        let directive = self.director.direct(&outcome.profile);
        let assistant_reply = self.generate_reply(request, &outcome.profile, &directive).await;

        let is_complete = directive.target == DirectiveTarget::Complete;
        let progress = schema::completion_progress(&outcome.profile);
        info!(
            next_field = directive.target.field_name().unwrap_or("-"),
            progress = progress,
            is_complete = is_complete,
            "Turn complete"
        );

        Ok(TurnResponse {
            assistant_reply,
            updated_profile: outcome.profile,
            is_complete,
            next_field: directive.target.field_name().map(str::to_string),
            progress,
            rejected: outcome.rejected,
        })
    }

    /// Ask the oracle for the next message, falling back to the directive's question
    async fn generate_reply(
        &self,
        request: &TurnRequest,
        profile: &Profile,
        directive: &PromptDirective,
    ) -> String {
        let system = build_interviewer_system_prompt(&self.persona, directive, profile);

        let mut messages: Vec<Message> = request.message_history.iter().map(Message::from).collect();
        if messages.is_empty() {
            messages.push(Message::user(OPENING_MESSAGE));
        }

        let result = send_with_timeout(
            self.provider.as_ref(),
            messages,
            Some(system),
            LlmRequestOptions::with_temperature(self.response_temperature),
            self.response_timeout,
        )
        .await;

        match result {
            Ok(response) if !response.text().trim().is_empty() => response.text().trim().to_string(),
            Ok(_) => {
                warn!(topic = %directive.topic, "Response generation returned nothing, using fallback question");
                directive.fallback_question.clone()
            }
            Err(e) => {
                warn!(topic = %directive.topic, error = %e, "Response generation failed, using fallback question");
                directive.fallback_question.clone()
            }
        }
    }
}

/// A reply that is present but blank is a malformed request.
fn validate_request(request: &TurnRequest) -> AppResult<()> {
    if let Some(reply) = request.latest_user_reply() {
        if reply.trim().is_empty() {
            return Err(AppError::validation("latest user message is empty"));
        }
    }
    Ok(())
}
