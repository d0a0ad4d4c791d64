//! Reporting API Client
//!
//! HTTP client for the pipeline reporting API. Each dataset is one plain
//! JSON GET; the client checks the status, decodes the envelope and hands
//! back the rows in the order they were received.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

use crate::pipeline::error::{FetchError, FetchResult};
use crate::pipeline::types::{Endpoint, Envelope, LastMonthRow, ProductRow, RegionRow};
use crate::pipeline::PipelineSource;

/// Base URL used when nothing else is configured.
///
/// Can be baked in at build time with `REVOPS_API_URL`.
pub const DEFAULT_API_URL: &str = match option_env!("REVOPS_API_URL") {
    Some(url) => url,
    None => "https://tm4o7kgf22.execute-api.us-east-1.amazonaws.com/prod/api",
};

/// Product filter value that means "no filter"
const ALL_PRODUCTS: &str = "All";

/// Longest error body excerpt kept in a status error
const MAX_ERROR_EXCERPT: usize = 200;

/// Configuration for the reporting API client
#[derive(Debug, Clone)]
pub struct PipelineClientConfig {
    /// Base URL of the reporting API (e.g., "https://example.com/prod/api")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Optional product filter for the last-month query
    pub last_month_product: Option<String>,
}

impl Default for PipelineClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout_ms: 30_000,
            last_month_product: None,
        }
    }
}

impl PipelineClientConfig {
    /// Create config pointing at a specific base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Reporting API client
pub struct PipelineClient {
    client: Client,
    config: PipelineClientConfig,
}

impl PipelineClient {
    /// Create a new client with the given configuration
    pub fn new(config: PipelineClientConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &PipelineClientConfig {
        &self.config
    }

    /// Full URL of an endpoint
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.path()
        )
    }

    /// Product filter for the last-month query, if one applies
    fn product_filter(&self) -> Option<&str> {
        self.config
            .last_month_product
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty() && *p != ALL_PRODUCTS)
    }

    /// GET one endpoint and decode its rows
    async fn fetch<T: DeserializeOwned>(&self, endpoint: Endpoint) -> FetchResult<Vec<T>> {
        let started = Instant::now();

        let mut request = self.client.get(self.url(endpoint));
        if endpoint == Endpoint::LastMonth {
            if let Some(product) = self.product_filter() {
                request = request.query(&[("product", product)]);
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_transport(endpoint, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_transport(endpoint, e))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
                message: error_message(&body, status),
            });
        }

        let envelope: Envelope<T> =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
                endpoint,
                message: e.to_string(),
            })?;

        if envelope.status.as_deref() == Some("error") {
            tracing::warn!(
                endpoint = %endpoint,
                backend_message = envelope.message.as_deref().unwrap_or_default(),
                "Backend reported an error with a success status"
            );
        }
        if let Some(filter) = envelope.filter.as_deref() {
            tracing::debug!(endpoint = %endpoint, filter, "Backend applied product filter");
        }

        let rows = envelope.into_rows();

        tracing::debug!(
            endpoint = %endpoint,
            rows = rows.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched pipeline dataset"
        );

        Ok(rows)
    }
}

#[async_trait]
impl PipelineSource for PipelineClient {
    async fn regions(&self) -> FetchResult<Vec<RegionRow>> {
        self.fetch(Endpoint::ByRegion).await
    }

    async fn products(&self) -> FetchResult<Vec<ProductRow>> {
        self.fetch(Endpoint::ByProduct).await
    }

    async fn last_month(&self) -> FetchResult<Vec<LastMonthRow>> {
        self.fetch(Endpoint::LastMonth).await
    }
}

/// Best human-readable message from a failed response
///
/// Prefers the backend's `message` field, then the raw body, then the
/// status reason phrase.
fn error_message(body: &[u8], status: StatusCode) -> String {
    serde_json::from_slice::<Envelope<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.message)
        .or_else(|| {
            let text = String::from_utf8_lossy(body);
            let text = text.trim();
            (!text.is_empty()).then(|| text.chars().take(MAX_ERROR_EXCERPT).collect())
        })
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string())
}
