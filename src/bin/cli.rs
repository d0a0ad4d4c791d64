//! RevOps CLI
//!
//! Terminal front end for the RevOps dashboard:
//! - Print the dashboard once
//! - Watch it interactively, refreshing on demand
//! - Generate a default config file

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use revops_dashboard::api::dto::DashboardResponse;
use revops_dashboard::config::{generate_default_config, Config};
use revops_dashboard::dashboard::{render_text, DashboardView, Heading, Page, RefreshOutcome};
use revops_dashboard::logging;
use revops_dashboard::pipeline::PipelineClient;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "revops")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sales pipeline analytics in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Reporting API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Only show one product in the last-month report
    #[arg(long, global = true)]
    pub product: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the datasets once and print the dashboard
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show the dashboard and refresh it each time Enter is pressed
    Watch,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_deref());
    }

    let (mut config, source) = Config::resolve(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.backend.base_url = url;
    }
    if let Some(product) = cli.product {
        config.backend.last_month_product = Some(product);
    }
    config.validate()?;

    logging::init(&config.logging).context("Failed to initialize logging")?;
    log_config_source(source.as_deref());

    let client = PipelineClient::new(config.backend.client_config())?;
    let view = DashboardView::new(Arc::new(client));
    let heading = config.dashboard.heading();

    match cli.command {
        Commands::Show { format } => {
            let outcome = view.refresh().await;
            let snapshot = view.snapshot();

            match format {
                OutputFormat::Json => {
                    let response = DashboardResponse::from(snapshot);
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                OutputFormat::Table => {
                    print!("{}", render_text(&Page::build(&snapshot), &heading, Local::now()));
                }
            }

            if matches!(outcome, RefreshOutcome::Failed(_)) {
                std::process::exit(1);
            }
        }

        Commands::Watch => watch(&view, &heading).await?,

        Commands::Config { .. } => {}
    }

    Ok(())
}

/// Render, then wait for Enter (refresh) or `q` (quit)
async fn watch(view: &DashboardView, heading: &Heading) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}", render_text(&Page::Loading, heading, Local::now()));
        view.refresh().await;

        let snapshot = view.snapshot();
        println!();
        print!("{}", render_text(&Page::build(&snapshot), heading, Local::now()));
        println!("Press Enter to refresh, q to quit.");

        match lines.next_line().await? {
            None => break,
            Some(line) if line.trim().eq_ignore_ascii_case("q") => break,
            Some(_) => continue,
        }
    }

    Ok(())
}

fn write_default_config(output: Option<&Path>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }

    Ok(())
}

fn log_config_source(source: Option<&Path>) {
    match source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("No config file found, using defaults with environment overrides"),
    }
}
