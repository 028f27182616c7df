mod config;
mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::services::catalog::Catalog;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::AppConfig::from_env().expect("invalid configuration");

    // Non-fatal: without an LLM client the assistant replies with its error text.
    let llm: Option<Arc<dyn llm::LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured, assistant disabled");
            None
        }
    };

    let catalog = if config.seed_catalog { Catalog::seeded() } else { Catalog::new() };
    if catalog.is_empty() {
        tracing::info!("catalog starts empty, seeding disabled");
    } else {
        tracing::info!(records = catalog.len(), "catalog loaded");
    }
    let state = state::AppState::new(catalog, llm);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "mockup-index listening");
    axum::serve(listener, app).await.expect("server failed");
}
