use serde::{Deserialize, Serialize};

use crate::domain::{errors::DomainError, Embedding};

/// A bounded segment of document text, the unit of embedding and retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub content: String,
    pub chunk_index: usize,
}

impl DocumentChunk {
    pub fn new(content: impl Into<String>, chunk_index: usize) -> Self {
        Self {
            content: content.into(),
            chunk_index,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub chunk: DocumentChunk,
    pub score: f32,
}

/// Splits text into fixed-size overlapping chunks.
///
/// The window advances by `chunk_size - overlap` characters each step, so each
/// chunk repeats the trailing `overlap` characters of its predecessor. Sizes
/// are in characters, not bytes, so multi-byte text is never split mid-char.
pub fn chunk_text(content: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = content.chars().collect();
    if chars.is_empty() || chunk_size == 0 {
        return Vec::new();
    }

    let step = chunk_size.saturating_sub(overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }

    chunks
}

/// An immutable similarity-searchable index over one document's chunks.
///
/// Built once per ingestion and owned by a single agent; a re-upload replaces
/// the whole index rather than merging into it.
#[derive(Debug)]
pub struct DocumentIndex {
    entries: Vec<(DocumentChunk, Embedding)>,
}

impl DocumentIndex {
    pub fn build(
        chunks: Vec<DocumentChunk>,
        embeddings: Vec<Embedding>,
    ) -> Result<Self, DomainError> {
        if chunks.len() != embeddings.len() {
            return Err(DomainError::ingestion(format!(
                "Chunk/embedding count mismatch: {} chunks, {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }

        Ok(Self {
            entries: chunks.into_iter().zip(embeddings).collect(),
        })
    }

    pub fn search(&self, query: &Embedding, top_k: usize) -> Vec<SearchResult> {
        let mut results: Vec<SearchResult> = self
            .entries
            .iter()
            .map(|(chunk, embedding)| SearchResult {
                chunk: chunk.clone(),
                score: query.cosine_similarity(embedding),
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);
        results
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
