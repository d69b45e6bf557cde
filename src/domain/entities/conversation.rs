use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

/// Sliding-window conversation memory.
///
/// Keeps the most recent `window_turns` exchange turns (one user message plus
/// one assistant message per turn). Older turns are silently discarded, not
/// summarized.
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    messages: Vec<Message>,
    window_turns: usize,
}

impl ConversationMemory {
    pub fn new(window_turns: usize) -> Self {
        Self {
            messages: Vec::new(),
            window_turns,
        }
    }

    pub fn record_turn(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.messages.push(Message::new(MessageRole::User, user));
        self.messages.push(Message::new(MessageRole::Assistant, assistant));

        let max_messages = self.window_turns * 2;
        if self.messages.len() > max_messages {
            let excess = self.messages.len() - max_messages;
            self.messages.drain(..excess);
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn turns(&self) -> usize {
        self.messages.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
