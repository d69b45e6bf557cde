pub mod agent;
pub mod config;
pub mod embedding;
pub mod llm;
pub mod loader;
pub mod sessions;
pub mod tools;
pub mod tracking;

pub use agent::SessionAgent;
pub use config::{AppConfig, Config, PromptsConfig};
pub use embedding::TextEmbedding;
pub use llm::GroqLlm;
pub use loader::FileDocumentLoader;
pub use sessions::SessionStore;
pub use tools::{DocumentRetrievalTool, ReminderTool};
pub use tracking::{ChatRun, ExperimentTracker};
