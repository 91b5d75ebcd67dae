//! HTTP transport for the rumbo guidance engine.
//!
//! Exposes the per-agent tracker operations (position samples, route
//! start, cancel, where-am-i) over a small JSON API and serves the
//! active route as GeoJSON.

mod config;
mod error;
mod handlers;
mod state;

use std::path::PathBuf;

use clap::Parser;
use rumbo_core::geocode::Gazetteer;
use rumbo_core::loading::{create_street_graph, StreetModelConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rumbo-server", about = "Turn-by-turn street guidance over HTTP")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "rumbo.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = config::Config::load(&cli.config)?;

    let graph = create_street_graph(&StreetModelConfig {
        nodes_path: config.data.nodes.clone(),
        edges_path: config.data.edges.clone(),
    })?;
    let gazetteer = Gazetteer::from_csv(&config.data.places)?;
    tracing::info!("gazetteer loaded with {} places", gazetteer.len());

    let app = handlers::router(state::AppState::new(graph, gazetteer));

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!("listening on {}", config.server.bind);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to install ctrl-c handler: {err}");
    } else {
        tracing::info!("shutting down");
    }
}
