//! LLM Provider Trait
//!
//! Defines the common interface for all oracle providers.

use std::time::Duration;

use async_trait::async_trait;

use super::types::{LlmError, LlmRequestOptions, LlmResponse, LlmResult, Message, ProviderConfig};

/// Trait that all LLM providers must implement.
///
/// Provides a unified interface for:
/// - Single message completions (send_message)
/// - Health checking
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Send a message and get a complete response.
    ///
    /// # Arguments
    /// * `messages` - Conversation history
    /// * `system` - Optional system prompt
    /// * `request_options` - Per-call overrides
    async fn send_message(
        &self,
        messages: Vec<Message>,
        system: Option<String>,
        request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse>;

    /// Check if the provider is healthy and reachable.
    async fn health_check(&self) -> LlmResult<()>;

    /// Get the configuration for this provider.
    fn config(&self) -> &ProviderConfig;
}

/// Send a message, failing with `LlmError::Timeout` once `limit` elapses.
pub async fn send_with_timeout(
    provider: &dyn LlmProvider,
    messages: Vec<Message>,
    system: Option<String>,
    request_options: LlmRequestOptions,
    limit: Duration,
) -> LlmResult<LlmResponse> {
    match tokio::time::timeout(limit, provider.send_message(messages, system, request_options))
        .await
    {
        Ok(result) => result,
        Err(_) => Err(LlmError::Timeout {
            seconds: limit.as_secs(),
        }),
    }
}

/// Health check bounded like `send_with_timeout`.
pub async fn check_with_timeout(provider: &dyn LlmProvider, limit: Duration) -> LlmResult<()> {
    match tokio::time::timeout(limit, provider.health_check()).await {
        Ok(result) => result,
        Err(_) => Err(LlmError::Timeout {
            seconds: limit.as_secs(),
        }),
    }
}

/// Helper function to create an error for missing API key
pub fn missing_api_key_error(provider: &str) -> LlmError {
    LlmError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Helper function to map transport errors; refused connections mean the provider is down
pub fn network_error(err: reqwest::Error) -> LlmError {
    if err.is_connect() {
        LlmError::ProviderUnavailable {
            message: err.to_string(),
        }
    } else {
        LlmError::NetworkError {
            message: err.to_string(),
        }
    }
}

/// Helper function to parse HTTP error status codes
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    match status {
        401 => LlmError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => LlmError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        404 => LlmError::ModelNotFound {
            model: body.to_string(),
        },
        429 => LlmError::RateLimited {
            message: body.to_string(),
            retry_after: None,
        },
        400 => LlmError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}
