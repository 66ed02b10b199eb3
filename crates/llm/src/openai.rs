//! OpenAI Provider
//!
//! Implementation of the LlmProvider trait for the OpenAI chat completions
//! API. Ollama exposes the same wire format, so it is served here too with
//! a local default endpoint and no API key.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::provider::{missing_api_key_error, network_error, parse_http_error, LlmProvider};
use super::types::{
    LlmError, LlmRequestOptions, LlmResponse, LlmResult, Message, MessageRole, ProviderConfig,
    ProviderType, StopReason, UsageStats,
};
use crate::http_client::build_http_client;

/// Default OpenAI API endpoint
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default Ollama OpenAI-compatible endpoint
const OLLAMA_API_URL: &str = "http://localhost:11434/v1/chat/completions";

/// OpenAI-compatible provider
pub struct OpenAIProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl OpenAIProvider {
    /// Create a new provider with the given configuration
    pub fn new(config: ProviderConfig) -> LlmResult<Self> {
        let client = build_http_client(None)?;
        Ok(Self { config, client })
    }

    fn is_ollama(&self) -> bool {
        self.config.provider == ProviderType::Ollama
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        let default = if self.is_ollama() {
            OLLAMA_API_URL
        } else {
            OPENAI_API_URL
        };
        self.config.base_url.as_deref().unwrap_or(default)
    }

    /// Build the request body for the API
    fn build_request_body(
        &self,
        messages: &[Message],
        system: Option<&str>,
        request_options: &LlmRequestOptions,
    ) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": request_options.max_tokens_override.unwrap_or(self.config.max_tokens),
            "temperature": request_options
                .temperature_override
                .unwrap_or(self.config.temperature),
            "stream": false,
        });

        let mut openai_messages: Vec<serde_json::Value> = Vec::new();

        if let Some(sys) = system {
            openai_messages.push(serde_json::json!({
                "role": "system",
                "content": sys
            }));
        }

        for msg in messages {
            openai_messages.push(serde_json::json!({
                "role": msg.role.as_str(),
                "content": msg.content
            }));
        }

        body["messages"] = serde_json::json!(openai_messages);

        if request_options.json_response {
            body["response_format"] = serde_json::json!({ "type": "json_object" });
        }

        body
    }

    /// Parse a response from the API
    fn parse_response(&self, response: &OpenAIResponse) -> LlmResponse {
        let choice = response.choices.first();

        let content = choice
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.clone());

        let stop_reason = choice
            .and_then(|c| c.finish_reason.as_ref())
            .map(|r| StopReason::from(r.as_str()))
            .unwrap_or(StopReason::EndTurn);

        let usage = response
            .usage
            .as_ref()
            .map(|u| UsageStats {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        LlmResponse {
            content,
            stop_reason,
            usage,
            model: response.model.clone(),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn name(&self) -> &'static str {
        if self.is_ollama() {
            "ollama"
        } else {
            "openai"
        }
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn send_message(
        &self,
        messages: Vec<Message>,
        system: Option<String>,
        request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        let api_key = match (&self.config.api_key, self.is_ollama()) {
            (Some(key), _) => Some(key.as_str()),
            (None, true) => None,
            (None, false) => return Err(missing_api_key_error(self.name())),
        };

        let body = self.build_request_body(&messages, system.as_deref(), &request_options);
        debug!(
            provider = self.name(),
            model = %self.config.model,
            messages = messages.len(),
            "Sending chat completion request"
        );

        let mut request = self
            .client
            .post(self.base_url())
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(key) = api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await.map_err(network_error)?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(network_error)?;

        if status != 200 {
            return Err(parse_http_error(status, &body_text, self.name()));
        }

        let openai_response: OpenAIResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        Ok(self.parse_response(&openai_response))
    }

    async fn health_check(&self) -> LlmResult<()> {
        let messages = vec![Message::text(MessageRole::User, "ping")];
        let options = LlmRequestOptions {
            max_tokens_override: Some(1),
            ..Default::default()
        };
        self.send_message(messages, None, options).await.map(|_| ())
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

/// OpenAI API response format
#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    model: String,
    usage: Option<ResponseUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
