use std::path::Path;

use async_trait::async_trait;

use crate::domain::{ports::DocumentLoader, DomainError};

/// Loads document text from disk, selecting the extractor by file extension.
///
/// `.pdf` (case-insensitive) goes through `pdf-extract`; anything else is read
/// as UTF-8 text. Disallowed extensions are rejected upstream at the API layer.
pub struct FileDocumentLoader;

#[async_trait]
impl DocumentLoader for FileDocumentLoader {
    async fn load(&self, path: &Path) -> Result<String, DomainError> {
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

        if is_pdf {
            let path = path.to_path_buf();
            // pdf-extract is synchronous; keep it off the async workers.
            tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path))
                .await
                .map_err(|e| DomainError::internal(e.to_string()))?
                .map_err(|e| DomainError::ingestion(format!("PDF extraction failed: {e}")))
        } else {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| DomainError::ingestion(format!("Failed to read file: {e}")))
        }
    }
}
