use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::groq;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tracing::error;

use crate::application::DocumentQa;
use crate::domain::{ConversationMemory, Message};
use crate::infrastructure::config::{AppConfig, ToolsConfig};
use crate::infrastructure::tools::{
    DocumentRetrievalTool, ReminderList, ReminderTool, RetrievalHandle,
};

const APOLOGY: &str = "I encountered an error while processing your request. Please try again.";

/// The per-session conversational agent.
///
/// Owns conversation memory, the reminder list, and the optional retrieval
/// handle; the language model decides when to invoke tools versus answer
/// directly.
pub struct SessionAgent {
    session_id: String,
    client: groq::Client,
    model: String,
    temperature: f64,
    system_prompt: String,
    max_tool_turns: usize,
    tools_config: ToolsConfig,
    memory: Mutex<ConversationMemory>,
    reminders: ReminderList,
    retrieval: RetrievalHandle,
    document_processed: AtomicBool,
}

impl SessionAgent {
    pub fn new(session_id: impl Into<String>, client: groq::Client, config: &AppConfig) -> Self {
        Self {
            session_id: session_id.into(),
            client,
            model: config.config.llm.model.clone(),
            temperature: config.config.llm.temperature,
            system_prompt: config.prompts.agent_system.clone(),
            max_tool_turns: config.config.llm.max_tool_turns,
            tools_config: config.config.tools.clone(),
            memory: Mutex::new(ConversationMemory::new(config.config.memory.window_turns)),
            reminders: Arc::new(Mutex::new(Vec::new())),
            retrieval: Arc::new(RwLock::new(None)),
            document_processed: AtomicBool::new(false),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn document_processed(&self) -> bool {
        self.document_processed.load(Ordering::SeqCst)
    }

    pub fn mark_document_processed(&self) {
        self.document_processed.store(true, Ordering::SeqCst);
    }

    /// Binds the retrieval handle, replacing any previous index wholesale.
    pub fn attach_document(&self, qa: DocumentQa) {
        *self.retrieval.write().unwrap_or_else(|e| e.into_inner()) = Some(Arc::new(qa));
    }

    pub fn has_document(&self) -> bool {
        self.retrieval
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    pub fn memory(&self) -> Vec<Message> {
        self.memory
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .messages()
            .to_vec()
    }

    pub fn reminders(&self) -> Vec<String> {
        self.reminders
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Runs one tool-augmented exchange turn.
    ///
    /// Infallible from the caller's perspective: any model or tool-loop
    /// failure degrades into a fixed apology string, and the turn is recorded
    /// in memory either way.
    pub async fn generate_response(&self, user_input: &str) -> String {
        let doc_status = if self.document_processed() {
            "The document is available."
        } else {
            "No document is available."
        };
        let modified_input = format!("{doc_status}\n{user_input}");

        let history = self.memory();
        let prompt = build_prompt(&modified_input, &history);

        let agent = self
            .client
            .agent(&self.model)
            .preamble(&self.system_prompt)
            .temperature(self.temperature)
            .tool(DocumentRetrievalTool::new(
                self.retrieval.clone(),
                self.tools_config.retrieval.clone(),
            ))
            .tool(ReminderTool::new(
                self.reminders.clone(),
                self.tools_config.reminder.clone(),
            ))
            .build();

        let answer = match agent.prompt(&prompt).multi_turn(self.max_tool_turns).await {
            Ok(answer) => answer,
            Err(e) => {
                error!(session_id = %self.session_id, error = %e, "Response generation failed");
                APOLOGY.to_string()
            }
        };

        self.memory
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .record_turn(modified_input, answer.clone());

        answer
    }
}

fn build_prompt(message: &str, history: &[Message]) -> String {
    if history.is_empty() {
        return message.to_string();
    }

    let context = history
        .iter()
        .map(|m| format!("{}: {}", m.role.as_str(), m.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Previous conversation:\n{}\n\nCurrent message from user: {}",
        context, message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{EchoLlm, HashEmbedding};
    use crate::domain::{DocumentChunk, DocumentIndex, MessageRole};
    use rig::client::ProviderClient;

    fn test_agent() -> SessionAgent {
        std::env::set_var("GROQ_API_KEY", "test-key");
        SessionAgent::new(
            "session-1",
            groq::Client::from_env(),
            &AppConfig::default(),
        )
    }

    fn test_qa(content: &str) -> DocumentQa {
        let embedder = HashEmbedding::new(8);
        let index = DocumentIndex::build(
            vec![DocumentChunk::new(content, 0)],
            vec![embedder.vector(content)],
        )
        .unwrap();
        DocumentQa::new(
            index,
            Arc::new(HashEmbedding::new(8)),
            Arc::new(EchoLlm),
            4,
            "{context}",
        )
    }

    #[test]
    fn test_new_agent_has_no_document() {
        let agent = test_agent();
        assert!(!agent.document_processed());
        assert!(!agent.has_document());
        assert!(agent.memory().is_empty());
        assert!(agent.reminders().is_empty());
    }

    #[tokio::test]
    async fn test_attach_document_replaces_wholesale() {
        use crate::infrastructure::tools::RetrievalArgs;
        use rig::tool::Tool;

        let agent = test_agent();
        agent.attach_document(test_qa("first content"));
        agent.attach_document(test_qa("second content"));
        assert!(agent.has_document());

        // A second upload swaps the handle rather than merging: only the
        // latest document is reachable through the retrieval tool.
        let tool = DocumentRetrievalTool::new(
            agent.retrieval.clone(),
            agent.tools_config.retrieval.clone(),
        );
        let result = tool
            .call(RetrievalArgs {
                query: "content".to_string(),
            })
            .await
            .unwrap();

        assert!(result.contains("second content"));
        assert!(!result.contains("first content"));
    }

    #[test]
    fn test_mark_document_processed() {
        let agent = test_agent();
        agent.mark_document_processed();
        assert!(agent.document_processed());
    }

    #[test]
    fn test_build_prompt_without_history() {
        assert_eq!(build_prompt("hello", &[]), "hello");
    }

    #[test]
    fn test_build_prompt_renders_history_roles() {
        let history = vec![
            Message::new(MessageRole::User, "hi"),
            Message::new(MessageRole::Assistant, "hello"),
        ];
        let prompt = build_prompt("next", &history);

        assert!(prompt.contains("User: hi"));
        assert!(prompt.contains("Assistant: hello"));
        assert!(prompt.contains("Current message from user: next"));
    }
}
