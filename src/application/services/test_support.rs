//! Deterministic port fakes for pipeline tests. No network.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;

use crate::domain::{
    ports::{EmbeddingService, LlmService},
    DomainError, Embedding,
};

/// Bag-of-words embedding: each word hashes to one dimension. Texts sharing
/// words score higher under cosine similarity, which is all retrieval tests
/// need.
pub struct HashEmbedding {
    dimension: usize,
}

impl HashEmbedding {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    pub fn vector(&self, text: &str) -> Embedding {
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

/// Returns the prompt verbatim, so tests can assert on what reached the model.
pub struct EchoLlm;

#[async_trait]
impl LlmService for EchoLlm {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        Ok(prompt.to_string())
    }
}

/// Always fails, for exercising error paths.
pub struct FailingLlm;

#[async_trait]
impl LlmService for FailingLlm {
    async fn complete(&self, _prompt: &str) -> Result<String, DomainError> {
        Err(DomainError::external("model unavailable"))
    }
}
