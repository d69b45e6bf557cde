use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::infrastructure::config::ReminderToolConfig;

pub type ReminderList = Arc<Mutex<Vec<String>>>;

#[derive(Debug, Deserialize, Serialize)]
pub struct ReminderArgs {
    pub reminder_text: String,
}

/// Appends reminder text to the session's list. Storage only: no scheduling,
/// no delivery, no time parsing.
pub struct ReminderTool {
    reminders: ReminderList,
    config: ReminderToolConfig,
}

impl ReminderTool {
    pub fn new(reminders: ReminderList, config: ReminderToolConfig) -> Self {
        Self { reminders, config }
    }
}

impl Tool for ReminderTool {
    const NAME: &'static str = "reminder_tool";

    type Error = Infallible;
    type Args = ReminderArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: self.config.name.clone(),
            description: self.config.description.clone(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "reminder_text": {
                        "type": "string",
                        "description": "The reminder text to store"
                    }
                },
                "required": ["reminder_text"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        info!(reminder = %args.reminder_text, "Reminder set");
        self.reminders
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(args.reminder_text.clone());
        Ok(format!("Reminder set: {}", args.reminder_text))
    }
}
