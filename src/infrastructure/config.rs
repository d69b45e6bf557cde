use serde::Deserialize;

/// Full application configuration: runtime settings plus prompt texts.
///
/// Defaults carry the fixed constants; optional YAML files override them.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub config: Config,
    pub prompts: PromptsConfig,
}

impl AppConfig {
    /// Loads configuration from `CONFIG_FILE` / `PROMPTS_FILE` (defaults
    /// `config.yaml` / `prompts.yaml`). Missing files fall back to defaults;
    /// malformed files are a startup error.
    pub fn load() -> anyhow::Result<Self> {
        let config_path =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.yaml".to_string());
        let prompts_path =
            std::env::var("PROMPTS_FILE").unwrap_or_else(|_| "prompts.yaml".to_string());

        Ok(Self {
            config: load_yaml(&config_path)?,
            prompts: load_yaml(&prompts_path)?,
        })
    }
}

fn load_yaml<T: for<'de> Deserialize<'de> + Default>(path: &str) -> anyhow::Result<T> {
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_yaml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Invalid config file {path}: {e}")),
        Err(_) => Ok(T::default()),
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cors: CorsConfig,
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub rag: RagConfig,
    pub memory: MemoryConfig,
    pub uploads: UploadsConfig,
    pub tracking: TrackingConfig,
    pub tools: ToolsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cors: CorsConfig::default(),
            llm: LlmConfig::default(),
            embedding: EmbeddingConfig::default(),
            rag: RagConfig::default(),
            memory: MemoryConfig::default(),
            uploads: UploadsConfig::default(),
            tracking: TrackingConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Empty list means wildcard.
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub temperature: f64,
    pub max_tool_turns: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "meta-llama/llama-4-scout-17b-16e-instruct".to_string(),
            temperature: 0.7,
            max_tool_turns: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub model: String,
    pub dimension: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimension: 1536,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub top_k: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    pub window_turns: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self { window_turns: 6 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadsConfig {
    pub dir: String,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: "/tmp/uploads".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub dir: String,
    pub experiment: String,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            dir: "mlflow_logs".to_string(),
            experiment: "chat_conversations".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub retrieval: RetrievalToolConfig,
    pub reminder: ReminderToolConfig,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            retrieval: RetrievalToolConfig::default(),
            reminder: ReminderToolConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalToolConfig {
    pub name: String,
    pub description: String,
    pub no_document_message: String,
}

impl Default for RetrievalToolConfig {
    fn default() -> Self {
        Self {
            name: "document_retrieval_tool".to_string(),
            description: "Retrieve information from uploaded documents. \
                          Use when asked about document content."
                .to_string(),
            no_document_message: "No documents have been processed yet. \
                                  Please upload a document first."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReminderToolConfig {
    pub name: String,
    pub description: String,
}

impl Default for ReminderToolConfig {
    fn default() -> Self {
        Self {
            name: "reminder_tool".to_string(),
            description: "Set a reminder for the user. \
                          Use when asked to remember something for later."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    pub agent_system: String,
    pub qa_template: String,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            agent_system: "You are a helpful personal assistant. Remember the user's name \
                and preferences. You can retrieve information from uploaded documents and \
                set reminders. Always be friendly and engaging. When asked to summarize a \
                document, use the document_retrieval_tool to get the content and provide a \
                concise summary. If the user mentions an attached document, assume it has \
                been processed and is available for querying. If the documents do not \
                contain relevant information for the user's query, use your own general \
                knowledge to provide a helpful and accurate response."
                .to_string(),
            qa_template: "You are an expert document assistant. Use the context below to \
                answer the question.\n\
                If the question is about summarizing the document, provide a comprehensive \
                summary.\n\
                If you don't know the answer, just say you don't know. Be detailed and \
                accurate.\n\n\
                Context: {context}\n\n\
                Question: {question}\n\n\
                Answer:"
                .to_string(),
        }
    }
}
