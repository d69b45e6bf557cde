use std::net::SocketAddr;
use std::sync::Arc;

use rig::client::ProviderClient;
use rig::providers::{groq, openai};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use personal_agent::api::{create_router, AppState};
use personal_agent::application::IngestionService;
use personal_agent::infrastructure::{AppConfig, FileDocumentLoader, GroqLlm, TextEmbedding};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "personal_agent=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Provider clients are built once; missing API keys fail the boot.
    let chat_client = groq::Client::from_env();
    let embedding_client = openai::Client::from_env();

    let ingestion = Arc::new(IngestionService::new(
        Arc::new(FileDocumentLoader),
        Arc::new(TextEmbedding::new(
            embedding_client,
            &config.config.embedding,
        )),
        Arc::new(GroqLlm::new(
            chat_client.clone(),
            config.config.llm.model.clone(),
            config.config.llm.temperature,
        )),
        &config,
    ));

    let state = AppState::new(config, chat_client, ingestion);
    let sessions = state.sessions.clone();
    let app = create_router(state);

    let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("SERVER_PORT")
        .unwrap_or_else(|_| "8000".into())
        .parse()?;
    let addr = SocketAddr::new(host.parse()?, port);

    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(sessions = sessions.len(), "Clearing session store");
    sessions.clear();

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    info!("Shutdown signal received");
}
