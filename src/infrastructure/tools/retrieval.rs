use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::convert::Infallible;
use std::sync::{Arc, RwLock};
use tracing::{error, info, warn};

use crate::application::DocumentQa;
use crate::infrastructure::config::RetrievalToolConfig;

pub type RetrievalHandle = Arc<RwLock<Option<Arc<DocumentQa>>>>;

#[derive(Debug, Deserialize, Serialize)]
pub struct RetrievalArgs {
    pub query: String,
}

/// Answers queries from the session's document index.
///
/// Failures come back as descriptive strings fed into the model loop, never
/// as errors; the model may relay or rephrase them to the user.
pub struct DocumentRetrievalTool {
    handle: RetrievalHandle,
    config: RetrievalToolConfig,
}

impl DocumentRetrievalTool {
    pub fn new(handle: RetrievalHandle, config: RetrievalToolConfig) -> Self {
        Self { handle, config }
    }
}

impl Tool for DocumentRetrievalTool {
    const NAME: &'static str = "document_retrieval_tool";

    type Error = Infallible;
    type Args = RetrievalArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: self.config.name.clone(),
            description: self.config.description.clone(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The question to answer from the uploaded document"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let qa = self
            .handle
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        let Some(qa) = qa else {
            warn!("Document retrieval not available");
            return Ok(self.config.no_document_message.clone());
        };

        info!(query = %args.query, "Document retrieval tool invoked");
        match qa.answer(&args.query).await {
            Ok(answer) => Ok(answer),
            Err(e) => {
                error!(error = %e, "Document retrieval failed");
                Ok(format!("Error retrieving document information: {e}"))
            }
        }
    }
}
