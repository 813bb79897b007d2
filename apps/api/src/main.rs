mod boolean;
mod config;
mod errors;
mod ingest;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::boolean::generator::{BooleanGenerator, SAMPLING_TEMPERATURE};
use crate::boolean::session::SessionStore;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JD Boolean API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize text-generation backend
    let llm = LlmClient::new(&config)?;
    info!(
        "LLM client initialized (model: {}, temperature: {})",
        llm.model(),
        SAMPLING_TEMPERATURE
    );

    let sessions = SessionStore::new(Duration::from_secs(config.session_ttl_secs));
    spawn_session_sweeper(sessions.clone(), config.session_ttl_secs);

    let state = AppState {
        generator: BooleanGenerator::new(Arc::new(llm)),
        sessions,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the recruiter UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drops idle sessions so abandoned ones do not accumulate between requests.
fn spawn_session_sweeper(sessions: SessionStore, ttl_secs: u64) {
    let period = Duration::from_secs(ttl_secs.clamp(1, 60));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let removed = sessions.prune_expired().await;
            if removed > 0 {
                info!("Session sweep removed {removed} expired session(s)");
            }
        }
    });
}
