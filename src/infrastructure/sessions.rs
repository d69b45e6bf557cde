use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::infrastructure::agent::SessionAgent;

/// In-memory mapping from session id to its agent.
///
/// Process-lifetime state with an explicit lifecycle: constructed at startup,
/// cleared on shutdown. No eviction, so the map grows with session count.
/// Concurrent requests for the same id interleave at turn granularity; that
/// is accepted for conversational state.
#[derive(Default)]
pub struct SessionStore {
    agents: RwLock<HashMap<String, Arc<SessionAgent>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the agent, overwriting any existing entry for the id.
    pub fn insert(&self, id: impl Into<String>, agent: Arc<SessionAgent>) {
        self.agents
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id.into(), agent);
    }

    pub fn get(&self, id: &str) -> Option<Arc<SessionAgent>> {
        self.agents
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.agents.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.agents
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}
