//! Shared fixtures: an AppState wired to deterministic port fakes, so router
//! and pipeline tests run without network access.
#![allow(dead_code)]

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use async_trait::async_trait;
use rig::client::ProviderClient;
use rig::providers::groq;

use personal_agent::api::AppState;
use personal_agent::application::IngestionService;
use personal_agent::domain::{
    ports::{EmbeddingService, LlmService},
    DomainError, Embedding,
};
use personal_agent::infrastructure::{config::TrackingConfig, AppConfig, FileDocumentLoader};

/// Bag-of-words embedding: texts sharing words score higher under cosine.
pub struct HashEmbedding {
    dimension: usize,
}

impl HashEmbedding {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn vector(&self, text: &str) -> Embedding {
        let mut vec = vec![0.0f32; self.dimension];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            vec[(hasher.finish() as usize) % self.dimension] += 1.0;
        }
        Embedding::new(vec)
    }
}

#[async_trait]
impl EmbeddingService for HashEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        Ok(self.vector(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Returns the prompt verbatim so assertions can see the retrieved context.
pub struct EchoLlm;

#[async_trait]
impl LlmService for EchoLlm {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        Ok(prompt.to_string())
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    let scratch = std::env::temp_dir().join(format!("agent-test-{}", uuid::Uuid::new_v4()));
    config.config.uploads.dir = scratch.join("uploads").to_string_lossy().into_owned();
    config.config.tracking = TrackingConfig {
        dir: scratch.join("tracking").to_string_lossy().into_owned(),
        experiment: "test_runs".to_string(),
    };
    config
}

pub fn test_state() -> AppState {
    let config = test_config();

    // A dummy key is enough: the client is only exercised on real chat calls,
    // which these tests never let succeed.
    std::env::set_var("GROQ_API_KEY", "test-key");
    let chat_client = groq::Client::from_env();

    let ingestion = Arc::new(IngestionService::new(
        Arc::new(FileDocumentLoader),
        Arc::new(HashEmbedding::new(16)),
        Arc::new(EchoLlm),
        &config,
    ));

    AppState::new(config, chat_client, ingestion)
}
