mod embedding;
mod llm;
mod loader;

pub use embedding::EmbeddingService;
pub use llm::LlmService;
pub use loader::DocumentLoader;
