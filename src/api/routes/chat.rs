use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::infrastructure::ChatRun;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let agent = state
        .sessions
        .get(&request.session_id)
        .ok_or_else(|| ApiError::not_found("Session not found"))?;

    let response = agent.generate_response(&request.text).await;

    // Best-effort experiment tracking; never surfaced to the user.
    let run = ChatRun::new(
        &request.session_id,
        &request.text,
        agent.document_processed(),
        &response,
    );
    if let Err(e) = state.tracker.log_run(&run).await {
        warn!(error = %e, "Failed to log chat run");
    }

    Ok(Json(ChatResponse { response }))
}
