use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::application::services::DocumentQa;
use crate::domain::{
    chunk_text,
    ports::{DocumentLoader, EmbeddingService, LlmService},
    DocumentChunk, DocumentIndex, DomainError,
};
use crate::infrastructure::config::AppConfig;

/// Builds a per-session retrieval index from an uploaded file.
///
/// Every step failure propagates to the caller and nothing is attached to the
/// agent; attachment only happens in the upload handler on success.
pub struct IngestionService {
    loader: Arc<dyn DocumentLoader>,
    embedding: Arc<dyn EmbeddingService>,
    llm: Arc<dyn LlmService>,
    chunk_size: usize,
    chunk_overlap: usize,
    top_k: usize,
    qa_template: String,
}

impl IngestionService {
    pub fn new(
        loader: Arc<dyn DocumentLoader>,
        embedding: Arc<dyn EmbeddingService>,
        llm: Arc<dyn LlmService>,
        config: &AppConfig,
    ) -> Self {
        Self {
            loader,
            embedding,
            llm,
            chunk_size: config.config.rag.chunk_size,
            chunk_overlap: config.config.rag.chunk_overlap,
            top_k: config.config.rag.top_k,
            qa_template: config.prompts.qa_template.clone(),
        }
    }

    #[instrument(skip(self))]
    pub async fn ingest(&self, path: &Path) -> Result<DocumentQa, DomainError> {
        if !path.exists() {
            return Err(DomainError::ingestion(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let text = self.loader.load(path).await?;

        let chunks: Vec<DocumentChunk> = chunk_text(&text, self.chunk_size, self.chunk_overlap)
            .into_iter()
            .enumerate()
            .map(|(i, content)| DocumentChunk::new(content, i))
            .collect();
        if chunks.is_empty() {
            return Err(DomainError::ingestion("Document contains no extractable text"));
        }
        info!(count = chunks.len(), "Split document into chunks");

        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let embeddings = self.embedding.embed_batch(&texts).await?;

        let index = DocumentIndex::build(chunks, embeddings)?;
        info!(entries = index.len(), "Document index built");

        Ok(DocumentQa::new(
            index,
            self.embedding.clone(),
            self.llm.clone(),
            self.top_k,
            self.qa_template.clone(),
        ))
    }
}
