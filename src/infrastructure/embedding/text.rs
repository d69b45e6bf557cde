use async_trait::async_trait;
use rig::client::EmbeddingsClient;
use rig::embeddings::EmbeddingsBuilder;
use rig::providers::openai;

use crate::domain::{ports::EmbeddingService, DomainError, Embedding};
use crate::infrastructure::config::EmbeddingConfig;

/// OpenAI embeddings through rig.
pub struct TextEmbedding {
    client: openai::Client,
    model: String,
    dimension: usize,
}

impl TextEmbedding {
    pub fn new(client: openai::Client, config: &EmbeddingConfig) -> Self {
        Self {
            client,
            model: config.model.clone(),
            dimension: config.dimension,
        }
    }
}

#[async_trait]
impl EmbeddingService for TextEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        let model = self.client.embedding_model(&self.model);

        let embeddings = EmbeddingsBuilder::new(model)
            .document(text)
            .map_err(|e| DomainError::external(e.to_string()))?
            .build()
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        embeddings
            .into_iter()
            .next()
            .map(|(_doc, emb)| {
                let vec_f32: Vec<f32> = emb.first().vec.into_iter().map(|x| x as f32).collect();
                Embedding::new(vec_f32)
            })
            .ok_or_else(|| DomainError::internal("No embedding returned"))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = self.client.embedding_model(&self.model);

        let mut builder = EmbeddingsBuilder::new(model);
        for text in texts {
            builder = builder
                .document(*text)
                .map_err(|e| DomainError::external(e.to_string()))?;
        }

        let embeddings = builder
            .build()
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(embeddings
            .into_iter()
            .map(|(_doc, emb)| {
                let vec_f32: Vec<f32> = emb.first().vec.into_iter().map(|x| x as f32).collect();
                Embedding::new(vec_f32)
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
