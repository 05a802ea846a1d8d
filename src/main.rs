use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

mod api;
mod config;
mod football_data;
mod matchup;

use api::AppState;
use config::Config;
use football_data::{spawn_sweeper, CachedFootballData, FootballDataClient, ResponseCache};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    if config.api_key.is_none() {
        warn!("FOOTBALL_DATA_API_KEY is not set; upstream will apply anonymous limits");
    }

    let client = FootballDataClient::new(
        &config.base_url,
        config.api_key.clone(),
        config.upstream_timeout(),
    )?;
    info!(
        "Upstream: {} (timeout {:?})",
        config.base_url,
        config.upstream_timeout()
    );

    // The cache lives as long as the process.
    let cache = ResponseCache::new();
    let sweeper = spawn_sweeper(cache.clone(), config.cache_sweep_interval());
    let data = CachedFootballData::new(client, cache, config.cache_ttls());

    let app = api::router(AppState {
        data: Arc::new(data),
    });
    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
