use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use sightline_client::{BrowserSettings, ChromiumFetcher, LlmConfig, OpenAiClient, ScraperTextExtractor};
use sightline_server::config::ServerConfig;
use sightline_server::routes;
use sightline_server::state::ProductionState;

const DEFAULT_LOG_FILTER: &str = "sightline_core=info,sightline_client=info,sightline_server=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .init();

    let server = ServerConfig::from_env()?;
    let llm_config = LlmConfig::from_env()?;
    let browser = BrowserSettings::from_env()?;

    if llm_config.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; LLM calls will fail until it is");
    }
    tracing::info!(model = %llm_config.model, base_url = %llm_config.base_url, "LLM provider configured");

    let state = Arc::new(ProductionState::new(
        ChromiumFetcher::chromium(browser),
        ScraperTextExtractor::new(),
        OpenAiClient::new(&llm_config)?,
    ));

    let app = routes::router(state).layer(TraceLayer::new_for_http());

    let addr = server.addr();
    tracing::info!("Starting server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
