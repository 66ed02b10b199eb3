//! Biographer LLM
//!
//! Narrow oracle interface used by the dialogue engine for both fact
//! extraction and response generation:
//! - OpenAI-compatible chat completions (OpenAI, Ollama)
//! - Anthropic Messages API
//! - Scripted provider for tests and offline dry runs
//!
//! Also includes the HTTP client factory and the provider factory.

pub mod anthropic;
pub mod http_client;
pub mod openai;
pub mod provider;
pub mod scripted;
pub mod types;

use std::sync::Arc;

// Re-export main types
pub use anthropic::AnthropicProvider;
pub use http_client::build_http_client;
pub use openai::OpenAIProvider;
pub use provider::LlmProvider;
pub use scripted::{RecordedCall, ScriptedProvider, ScriptedReply};
pub use types::*;

/// Create an LLM provider from a ProviderConfig.
///
/// Maps ProviderType to the concrete provider implementation. Ollama is
/// served through its OpenAI-compatible endpoint.
pub fn create_provider(config: ProviderConfig) -> LlmResult<Arc<dyn LlmProvider>> {
    let provider: Arc<dyn LlmProvider> = match config.provider {
        ProviderType::Anthropic => Arc::new(AnthropicProvider::new(config)?),
        ProviderType::OpenAI | ProviderType::Ollama => Arc::new(OpenAIProvider::new(config)?),
    };
    Ok(provider)
}
