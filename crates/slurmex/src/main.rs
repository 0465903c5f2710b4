//! slurmex - Prometheus exporter for SLURM partitions.

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use slurmex_cli::Args;
use slurmex_parsers::SystemOutputProvider;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod api;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with(fmt::layer())
        .init();

    let collectors = args.collectors();
    tracing::info!(
        collectors = ?collectors.iter().map(|c| c.name()).collect::<Vec<_>>(),
        "Starting slurmex"
    );

    let state = Arc::new(api::AppState::new(
        Arc::new(SystemOutputProvider),
        collectors,
    ));

    let listener = tokio::net::TcpListener::bind(args.listen_address)
        .await
        .into_diagnostic()?;
    tracing::info!(addr = %args.listen_address, "Serving metrics");

    axum::serve(listener, api::create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .into_diagnostic()?;

    tracing::info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
