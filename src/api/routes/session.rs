use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::api::state::AppState;

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
}

pub async fn start_session(State(state): State<AppState>) -> Json<StartSessionResponse> {
    let session_id = Uuid::new_v4().to_string();
    let agent = state.new_agent(&session_id);
    state.sessions.insert(&session_id, agent);
    info!(%session_id, "Started new session");

    Json(StartSessionResponse { session_id })
}
