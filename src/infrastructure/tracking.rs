use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::domain::DomainError;
use crate::infrastructure::config::TrackingConfig;

/// One experiment-tracking record per chat turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRun {
    pub run_id: Uuid,
    pub session_id: String,
    pub user_input: String,
    pub timestamp: DateTime<Utc>,
    pub document_processed: bool,
    pub agent_response: String,
    pub response_length: usize,
}

impl ChatRun {
    pub fn new(
        session_id: impl Into<String>,
        user_input: impl Into<String>,
        document_processed: bool,
        agent_response: impl Into<String>,
    ) -> Self {
        let agent_response = agent_response.into();
        Self {
            run_id: Uuid::new_v4(),
            session_id: session_id.into(),
            user_input: user_input.into(),
            timestamp: Utc::now(),
            document_processed,
            response_length: agent_response.len(),
            agent_response,
        }
    }
}

/// Appends one JSON line per chat run to `<dir>/<experiment>.jsonl`.
///
/// Best-effort: callers log failures at warn and never surface them to the
/// user.
pub struct ExperimentTracker {
    dir: PathBuf,
    experiment: String,
}

impl ExperimentTracker {
    pub fn new(config: &TrackingConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.dir),
            experiment: config.experiment.clone(),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.join(format!("{}.jsonl", self.experiment))
    }

    pub async fn log_run(&self, run: &ChatRun) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let mut line =
            serde_json::to_string(run).map_err(|e| DomainError::internal(e.to_string()))?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_path())
            .await
            .map_err(|e| DomainError::internal(e.to_string()))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| DomainError::internal(e.to_string()))?;

        Ok(())
    }
}
