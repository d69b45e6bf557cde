use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use std::path::Path;
use tracing::{error, info};

use crate::api::error::ApiError;
use crate::api::state::AppState;

const ALLOWED_EXTENSIONS: [&str; 2] = ["pdf", "txt"];

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
}

pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut session_id: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        match field.name() {
            Some("session_id") => {
                session_id = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(e.to_string()))?,
                );
            }
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(ToOwned::to_owned)
                    .ok_or_else(|| ApiError::bad_request("Missing filename"))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
                file = Some((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let session_id = session_id.ok_or_else(|| ApiError::bad_request("Missing session_id field"))?;
    let (filename, bytes) = file.ok_or_else(|| ApiError::bad_request("Missing file field"))?;
    info!(%session_id, %filename, "Upload request");

    // Session is resolved before the extension is validated.
    let agent = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| ApiError::not_found("Session not found"))?;

    let extension = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    if filename.rsplit('.').count() < 2 || !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ApiError::bad_request("Only PDF/TXT files are allowed"));
    }

    // Staged by original filename only; concurrent same-name uploads across
    // sessions race on this path (known boundary condition).
    let upload_dir = Path::new(&state.config.config.uploads.dir);
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| internal_upload_error(e))?;

    let staged_name = Path::new(&filename)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(filename.clone());
    let file_path = upload_dir.join(staged_name);
    tokio::fs::write(&file_path, &bytes)
        .await
        .map_err(|e| internal_upload_error(e))?;
    info!(bytes = bytes.len(), path = %file_path.display(), "Saved uploaded file");

    let qa = state
        .ingestion
        .ingest(&file_path)
        .await
        .map_err(|e| internal_upload_error(e))?;

    agent.attach_document(qa);
    agent.mark_document_processed();
    info!(%filename, "Processed document");

    Ok(Json(UploadResponse {
        message: format!("Document '{filename}' processed successfully"),
    }))
}

fn internal_upload_error(e: impl std::fmt::Display) -> ApiError {
    error!(error = %e, "Upload failed");
    ApiError::internal(format!("Document processing failed: {e}"))
}
