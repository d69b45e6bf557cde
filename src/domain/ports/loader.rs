use std::path::Path;

use crate::domain::errors::DomainError;
use async_trait::async_trait;

/// Extracts raw text from an uploaded document file.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn load(&self, path: &Path) -> Result<String, DomainError>;
}
