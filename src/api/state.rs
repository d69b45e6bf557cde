use std::sync::Arc;

use rig::providers::groq;

use crate::application::IngestionService;
use crate::infrastructure::{AppConfig, ExperimentTracker, SessionAgent, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub ingestion: Arc<IngestionService>,
    pub tracker: Arc<ExperimentTracker>,
    pub chat_client: groq::Client,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        chat_client: groq::Client,
        ingestion: Arc<IngestionService>,
    ) -> Self {
        let tracker = Arc::new(ExperimentTracker::new(&config.config.tracking));
        Self {
            sessions: Arc::new(SessionStore::new()),
            ingestion,
            tracker,
            chat_client,
            config: Arc::new(config),
        }
    }

    pub fn new_agent(&self, session_id: &str) -> Arc<SessionAgent> {
        Arc::new(SessionAgent::new(
            session_id,
            self.chat_client.clone(),
            &self.config,
        ))
    }
}
