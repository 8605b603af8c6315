mod config;
mod errors;
mod matching;
mod models;
mod readiness;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::readiness::index::READINESS_WEIGHTS;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("pathway_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pathway API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Readiness weights: profile={} skills={} activity={} network={}",
        READINESS_WEIGHTS.profile,
        READINESS_WEIGHTS.skills,
        READINESS_WEIGHTS.activity,
        READINESS_WEIGHTS.network
    );
    info!(
        "Request limits: catalogue={} peer suggestions={}",
        config.max_catalogue_size, config.peer_suggestion_limit
    );

    let state = AppState {
        config: config.clone(),
    };

    // Build router
    // TODO: restrict origins once the web client's host is fixed
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
