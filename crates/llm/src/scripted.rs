//! Scripted Provider
//!
//! Deterministic provider that replays queued replies in order and records
//! every call it receives. Used by tests and by offline dry runs, where an
//! empty script makes every call fail with `ProviderUnavailable`.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::provider::LlmProvider;
use super::types::{
    LlmError, LlmRequestOptions, LlmResponse, LlmResult, Message, ProviderConfig,
};

const SCRIPTED_MODEL: &str = "scripted";

/// One queued reply
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Respond immediately with text
    Text(String),
    /// Respond with text after a delay (exercises caller timeouts)
    Delayed { after: Duration, text: String },
    /// Fail the call
    Error(LlmError),
}

/// A call observed by the scripted provider
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub messages: Vec<Message>,
    pub system: Option<String>,
    pub options: LlmRequestOptions,
}

pub struct ScriptedProvider {
    config: ProviderConfig,
    replies: Mutex<VecDeque<ScriptedReply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            config: ProviderConfig {
                model: SCRIPTED_MODEL.to_string(),
                ..Default::default()
            },
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Provider with no replies; every call fails
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn with_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            texts
                .into_iter()
                .map(|t| ScriptedReply::Text(t.into()))
                .collect(),
        )
    }

    /// Queue another reply
    pub fn push(&self, reply: ScriptedReply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
    }

    /// Calls received so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
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
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                messages,
                system,
                options: request_options,
            });
        }

        // Guard dropped before any await
        let next = self
            .replies
            .lock()
            .map_err(|_| LlmError::Other {
                message: "scripted provider lock poisoned".to_string(),
            })?
            .pop_front();

        match next {
            Some(ScriptedReply::Text(text)) => Ok(LlmResponse::from_text(text, SCRIPTED_MODEL)),
            Some(ScriptedReply::Delayed { after, text }) => {
                tokio::time::sleep(after).await;
                Ok(LlmResponse::from_text(text, SCRIPTED_MODEL))
            }
            Some(ScriptedReply::Error(err)) => Err(err),
            None => Err(LlmError::ProviderUnavailable {
                message: "no scripted replies remaining".to_string(),
            }),
        }
    }

    /// Healthy while replies remain; never consumes one.
    async fn health_check(&self) -> LlmResult<()> {
        let remaining = self.replies.lock().map(|r| r.len()).unwrap_or(0);
        if remaining == 0 {
            return Err(LlmError::ProviderUnavailable {
                message: "no scripted replies remaining".to_string(),
            });
        }
        Ok(())
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}
