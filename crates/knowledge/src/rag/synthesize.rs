//! Answer synthesis via the language model.

use crate::rag::types::Synthesis;
use crate::types::ScoredChunk;
use regio_core::{AppError, AppResult};
use regio_llm::{LlmClient, LlmRequest};
use regio_prompt::BuiltPrompt;
use std::sync::Arc;

/// Sends a built prompt to the model and returns its trimmed reply.
#[derive(Clone)]
pub struct AnswerSynthesizer {
    client: Arc<dyn LlmClient>,
    model: String,
    temperature: f32,
}

impl std::fmt::Debug for AnswerSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerSynthesizer")
            .field("provider", &self.client.provider_name())
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl AnswerSynthesizer {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            client,
            model: model.into(),
            temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model to answer from the prompt's context.
    ///
    /// Transport and model errors surface as `AppError::Synthesis`. An empty
    /// or refusing reply is returned as-is; judging it is the caller's job.
    pub async fn synthesize(
        &self,
        prompt: &BuiltPrompt,
        sources: Vec<ScoredChunk>,
    ) -> AppResult<Synthesis> {
        let request =
            LlmRequest::new(prompt.user.clone(), self.model.clone()).with_temperature(self.temperature);

        tracing::debug!(
            "Requesting answer from {} ({}) with {} context passages",
            self.client.provider_name(),
            self.model,
            prompt.metadata.context_passages
        );

        let response = self.client.complete(&request).await.map_err(|e| {
            AppError::Synthesis(format!(
                "{} request failed: {}",
                self.client.provider_name(),
                e
            ))
        })?;

        Ok(Synthesis {
            answer: response.content.trim().to_string(),
            sources,
        })
    }
}
