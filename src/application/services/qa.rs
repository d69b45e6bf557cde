use std::sync::Arc;
use tracing::instrument;

use crate::domain::{
    ports::{EmbeddingService, LlmService},
    DocumentIndex, DomainError,
};

/// Question answering over one ingested document.
///
/// Retrieves the top-k nearest chunks for a query and synthesizes an answer
/// through the language model using a fixed prompt template.
pub struct DocumentQa {
    index: DocumentIndex,
    embedding: Arc<dyn EmbeddingService>,
    llm: Arc<dyn LlmService>,
    top_k: usize,
    prompt_template: String,
}

impl DocumentQa {
    pub fn new(
        index: DocumentIndex,
        embedding: Arc<dyn EmbeddingService>,
        llm: Arc<dyn LlmService>,
        top_k: usize,
        prompt_template: impl Into<String>,
    ) -> Self {
        Self {
            index,
            embedding,
            llm,
            top_k,
            prompt_template: prompt_template.into(),
        }
    }

    pub fn chunk_count(&self) -> usize {
        self.index.len()
    }

    #[instrument(skip(self))]
    pub async fn answer(&self, question: &str) -> Result<String, DomainError> {
        let query = self.embedding.embed(question).await?;
        let results = self.index.search(&query, self.top_k);

        let context = results
            .iter()
            .enumerate()
            .map(|(i, r)| format!("[{}] {}", i + 1, r.chunk.content))
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = self
            .prompt_template
            .replace("{context}", &context)
            .replace("{question}", question);

        self.llm.complete(&prompt).await
    }
}
