use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::groq;

use crate::domain::{ports::LlmService, DomainError};

/// Groq chat completions through rig, used for answer synthesis in the
/// question-answering pipeline.
pub struct GroqLlm {
    client: groq::Client,
    model: String,
    temperature: f64,
}

impl GroqLlm {
    pub fn new(client: groq::Client, model: impl Into<String>, temperature: f64) -> Self {
        Self {
            client,
            model: model.into(),
            temperature,
        }
    }
}

#[async_trait]
impl LlmService for GroqLlm {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        let agent = self
            .client
            .agent(&self.model)
            .temperature(self.temperature)
            .build();
        agent
            .prompt(prompt)
            .await
            .map_err(|e| DomainError::external(e.to_string()))
    }
}
