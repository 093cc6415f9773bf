//! Weather stats proxy service.
//!
//! Proxies Meteoblue hourly packages, extracts the current time slot on
//! request, and publishes computed results to the cache sink.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use stats_api::config::AppConfig;
use stats_api::handlers;
use stats_api::state::AppState;

/// Weather stats API server.
#[derive(Parser, Debug)]
#[command(name = "stats-api")]
#[command(about = "Weather stats proxy for the skyviewer services")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "STATS_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!("Starting weather stats service");

    let config = AppConfig::from_env();
    info!(
        basic_endpoint = %config.basic_endpoint,
        cloud_endpoint = %config.cloud_endpoint,
        location = %config.fetch.name,
        "Loaded configuration"
    );

    let state = Arc::new(AppState::new(config)?);

    let app = handlers::build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = args.listen.parse().context("Invalid listen address")?;
    info!(addr = %addr, "stats-api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
