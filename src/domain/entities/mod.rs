mod conversation;
mod document;
mod embedding;

pub use conversation::{ConversationMemory, Message, MessageRole};
pub use document::{chunk_text, DocumentChunk, DocumentIndex, SearchResult};
pub use embedding::Embedding;
