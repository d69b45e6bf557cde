mod support;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use personal_agent::api::create_router;

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn multipart_request(session_id: &str, filename: &str, contents: &[u8]) -> Request<Body> {
    let boundary = "----agent-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"session_id\"\r\n\r\n\
             {session_id}\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::post("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn start_session(app: &axum::Router) -> String {
    let response = app
        .clone()
        .oneshot(Request::post("/start_session").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await["session_id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(support::test_state());

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_client_page_served_at_root() {
    let app = create_router(support::test_state());

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_start_session_returns_unique_uuids() {
    let app = create_router(support::test_state());

    let first = start_session(&app).await;
    let second = start_session(&app).await;

    uuid::Uuid::parse_str(&first).unwrap();
    uuid::Uuid::parse_str(&second).unwrap();
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_start_session_casing_synonym() {
    let app = create_router(support::test_state());

    let response = app
        .oneshot(Request::post("/start_Session").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(json_body(response).await["session_id"].is_string());
}

#[tokio::test]
async fn test_new_session_is_immediately_chattable() {
    let state = support::test_state();
    let app = create_router(state.clone());
    let session_id = start_session(&app).await;

    // This turn drives a real connection attempt to the provider endpoint:
    // offline it fails to connect, online the dummy key is rejected. Both
    // paths are absorbed into a conversational reply, never an HTTP error,
    // which is the only contract asserted here.
    let response = app
        .oneshot(
            Request::post("/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(format!(
                    r#"{{"text": "hello", "session_id": "{session_id}"}}"#
                )))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let reply = json_body(response).await["response"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(!reply.is_empty());

    // The turn is recorded even when generation fails.
    let agent = state.sessions.get(&session_id).unwrap();
    assert_eq!(agent.memory().len(), 2);
}

#[tokio::test]
async fn test_chat_unknown_session_is_404() {
    let app = create_router(support::test_state());

    let response = app
        .oneshot(
            Request::post("/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"text": "hello", "session_id": "no-such-session"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["detail"], "Session not found");
}

#[tokio::test]
async fn test_upload_unknown_session_is_404() {
    let app = create_router(support::test_state());

    let response = app
        .oneshot(multipart_request("no-such-session", "notes.txt", b"hello"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["detail"], "Session not found");
}

#[tokio::test]
async fn test_upload_disallowed_extension_is_400() {
    let state = support::test_state();
    let app = create_router(state);
    let session_id = start_session(&app).await;

    let response = app
        .oneshot(multipart_request(&session_id, "report.docx", b"hello"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["detail"],
        "Only PDF/TXT files are allowed"
    );
}

#[tokio::test]
async fn test_upload_extension_check_is_case_insensitive() {
    let app = create_router(support::test_state());
    let session_id = start_session(&app).await;

    let response = app
        .oneshot(multipart_request(
            &session_id,
            "NOTES.TXT",
            b"Some note text.",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_successful_upload_marks_document_processed() {
    let state = support::test_state();
    let app = create_router(state.clone());
    let session_id = start_session(&app).await;

    let agent = state.sessions.get(&session_id).unwrap();
    assert!(!agent.document_processed());

    let response = app
        .oneshot(multipart_request(
            &session_id,
            "notes.txt",
            b"Project deadline is Friday.",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await["message"],
        "Document 'notes.txt' processed successfully"
    );
    assert!(agent.document_processed());
    assert!(agent.has_document());
}

#[tokio::test]
async fn test_multi_megabyte_upload_is_processed() {
    let state = support::test_state();
    let app = create_router(state.clone());
    let session_id = start_session(&app).await;

    // Well past the 2 MB default body limit.
    let contents = "Project deadline is Friday. ".repeat(120_000);
    assert!(contents.len() > 3 * 1024 * 1024);

    let response = app
        .oneshot(multipart_request(
            &session_id,
            "notes.txt",
            contents.as_bytes(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let agent = state.sessions.get(&session_id).unwrap();
    assert!(agent.document_processed());
}

#[tokio::test]
async fn test_upload_empty_file_is_500_with_detail() {
    let state = support::test_state();
    let app = create_router(state.clone());
    let session_id = start_session(&app).await;

    let agent = state.sessions.get(&session_id).unwrap();
    let response = app
        .oneshot(multipart_request(&session_id, "empty.txt", b""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let detail = json_body(response).await["detail"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(detail.starts_with("Document processing failed:"));
    // Failed ingestion leaves the agent untouched.
    assert!(!agent.document_processed());
    assert!(!agent.has_document());
}
