mod config;
mod errors;
mod extract;
mod llm_client;
mod review;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::OpenAiClient;
use crate::review::pacing::TokioPacer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ClauseCheck API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the completion client — the only place API credentials are wired up
    let llm = OpenAiClient::new(config.openai_api_key.clone(), config.openai_model.clone());
    info!("Completion client initialized (model: {})", llm.model());

    // Initialize the pacing policy for the review loop
    let pacer = TokioPacer::new(config.pace_between_calls_ms, config.rate_limit_cooldown_ms);

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        pacer: Arc::new(pacer),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
