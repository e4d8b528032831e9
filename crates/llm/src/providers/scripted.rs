//! Scripted LLM provider for offline runs and tests.

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use regio_core::{AppError, AppResult};
use std::sync::Mutex;

/// What a [`ScriptedClient`] does on every call.
#[derive(Debug, Clone)]
pub enum Script {
    /// Reply with this text
    Reply(String),
    /// Fail with `AppError::Llm` carrying this message
    Fail(String),
}

/// Provider that answers every request from a fixed script.
///
/// Received requests are recorded so callers can assert on the prompt
/// text and on whether the model was consulted at all.
#[derive(Debug)]
pub struct ScriptedClient {
    script: Script,
    requests: Mutex<Vec<LlmRequest>>,
}

impl ScriptedClient {
    /// Client that always replies with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(Script::Reply(text.into()))
    }

    /// Client that always fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(Script::Fail(message.into()))
    }

    pub fn new(script: Script) -> Self {
        Self {
            script,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Copies of every request received so far.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedClient {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        match &self.script {
            Script::Reply(text) => Ok(LlmResponse {
                content: text.clone(),
                model: request.model.clone(),
                usage: LlmUsage::default(),
            }),
            Script::Fail(message) => Err(AppError::Llm(message.clone())),
        }
    }
}
