pub mod chat;
pub mod client;
pub mod health;
pub mod session;
pub mod upload;

use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::{routing::get, routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = build_cors(&state.config.config.cors.allowed_origins);

    Router::new()
        .route("/", get(client::client_page))
        .route("/health", get(health::health_check))
        .route("/start_session", post(session::start_session))
        // Path-casing synonym kept for client compatibility.
        .route("/start_Session", post(session::start_session))
        // No size cap on uploads; large documents are processed synchronously.
        .route(
            "/upload",
            post(upload::upload_document).layer(DefaultBodyLimit::disable()),
        )
        .route("/chat", post(chat::chat_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(origins)
    }
}
