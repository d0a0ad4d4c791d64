//! Pipeline Reporting API
//!
//! Row types, the response envelope and the HTTP client for the three
//! reporting endpoints the dashboard reads:
//!
//! - `GET {base}/pipeline/by-region` - cached pipeline aggregation by region
//! - `GET {base}/pipeline/by-product` - cached pipeline aggregation by product
//! - `GET {base}/sales/last-month` - live query over last month's sales
//!
//! The [`PipelineSource`] trait is the seam between the dashboard view and
//! the network, so the view can be driven by any source of rows.

pub mod client;
pub mod error;
pub mod types;

pub use client::{PipelineClient, PipelineClientConfig};
pub use error::{FetchError, FetchResult};
pub use types::{Endpoint, Envelope, LastMonthRow, ProductRow, RegionRow};

use async_trait::async_trait;

/// Anything that can produce the three pipeline datasets
#[async_trait]
pub trait PipelineSource: Send + Sync {
    /// Pipeline aggregated by region
    async fn regions(&self) -> FetchResult<Vec<RegionRow>>;

    /// Pipeline aggregated by product
    async fn products(&self) -> FetchResult<Vec<ProductRow>>;

    /// Last month's sales by product and region
    async fn last_month(&self) -> FetchResult<Vec<LastMonthRow>>;
}
