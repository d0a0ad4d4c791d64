//! # RevOps Dashboard
//!
//! Sales pipeline analytics, rendered from a remote reporting API.
//!
//! The dashboard reads three datasets (pipeline by region, pipeline by
//! product, last month's sales) and shows them as tables plus a summary
//! panel derived from the region data. All aggregation happens in the
//! backend; this crate only fetches, holds and renders.
//!
//! ## Modules
//!
//! - [`pipeline`]: Row types and the reporting API client
//! - [`dashboard`]: View state, refresh cycle, formatting and renderers
//! - [`api`]: HTTP server for the HTML dashboard and its JSON mirror
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: `tracing` subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use revops_dashboard::dashboard::{render_text, DashboardView, Heading, Page};
//! use revops_dashboard::pipeline::{PipelineClient, PipelineClientConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PipelineClient::new(PipelineClientConfig::default())?;
//!     let view = DashboardView::new(Arc::new(client));
//!
//!     view.refresh().await;
//!
//!     let page = Page::build(&view.snapshot());
//!     print!("{}", render_text(&page, &Heading::default(), chrono::Local::now()));
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod pipeline;

// Re-export top-level types for convenience
pub use pipeline::{
    Endpoint, FetchError, FetchResult, LastMonthRow, PipelineClient, PipelineClientConfig,
    PipelineSource, ProductRow, RegionRow,
};

pub use dashboard::{
    format_count, format_usd, render_html, render_text, DashboardView, Heading, Page,
    RefreshOutcome, RefreshStats, Summary, ViewState,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{
    BackendConfig, Config, ConfigError, DashboardConfig, LoggingConfig, ServerConfig,
};
