//! RevOps Dashboard Server
//!
//! Serves the dashboard as a single HTML page.
//!
//! Run with: cargo run --bin revops-dashboard
//!
//! # Configuration
//!
//! Settings come from a TOML file (`--config`, or the default locations)
//! and environment variables:
//! - `REVOPS_API_URL`: Reporting API base URL
//! - `REVOPS_HOST` / `REVOPS_PORT`: Address to bind to (default: 127.0.0.1:8084)
//! - `REVOPS_LOG_LEVEL` / `REVOPS_LOG_FORMAT`: Logging (default: info, pretty)
//! - `RUST_LOG`: Full filter directive, wins over the configured level

use anyhow::Context;
use clap::Parser;
use revops_dashboard::api::{serve, AppState};
use revops_dashboard::config::Config;
use revops_dashboard::dashboard::DashboardView;
use revops_dashboard::logging;
use revops_dashboard::pipeline::PipelineClient;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "revops-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve the RevOps pipeline dashboard")]
struct Args {
    /// Path to a config file (default: search standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut config, source) = Config::resolve(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    logging::init(&config.logging).context("Failed to initialize logging")?;
    log_config_source(source.as_deref());

    tracing::info!("Starting RevOps dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Reporting API: {}", config.backend.base_url);

    let client = PipelineClient::new(config.backend.client_config())?;
    let view = Arc::new(DashboardView::new(Arc::new(client)));

    // The first cycle runs while the server comes up; the page shows the
    // loading indicator until it commits.
    view.spawn_refresh();

    let state = AppState::new(view, config.dashboard.heading(), config.server.clone());
    serve(state).await?;

    tracing::info!("RevOps dashboard stopped");
    Ok(())
}

fn log_config_source(source: Option<&Path>) {
    match source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("No config file found, using defaults with environment overrides"),
    }
}
