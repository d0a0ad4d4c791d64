//! Data Transfer Objects
//!
//! Response types for the JSON routes.

use serde::Serialize;

use crate::dashboard::{RefreshOutcome, Summary, ViewState};
use crate::pipeline::{LastMonthRow, ProductRow, RegionRow};

// ============================================
// DASHBOARD DTOs
// ============================================

/// JSON mirror of the dashboard view
///
/// `report` follows the same rules as the rendered page: it is only present
/// when the view is neither loading nor failed.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// "loading", "error" or "ready"
    pub phase: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub report: Option<ReportDto>,
    /// RFC 3339 time of the last committed refresh
    pub last_refreshed: Option<String>,
    pub committed_cycles: u64,
}

/// Datasets and summary of a ready view
#[derive(Debug, Serialize)]
pub struct ReportDto {
    pub regions: Vec<RegionRow>,
    pub products: Vec<ProductRow>,
    pub last_month: Vec<LastMonthRow>,
    pub summary: Summary,
}

impl From<ViewState> for DashboardResponse {
    fn from(state: ViewState) -> Self {
        let last_refreshed = state.last_refreshed.map(|t| t.to_rfc3339());
        let committed_cycles = state.committed_cycles;

        let (phase, error, report) = if state.loading {
            ("loading", None, None)
        } else if let Some(error) = state.error {
            ("error", Some(error), None)
        } else {
            let summary = Summary::from_regions(&state.regions);
            (
                "ready",
                None,
                Some(ReportDto {
                    regions: state.regions,
                    products: state.products,
                    last_month: state.last_month,
                    summary,
                }),
            )
        };

        Self {
            phase: phase.to_string(),
            error,
            report,
            last_refreshed,
            committed_cycles,
        }
    }
}

// ============================================
// REFRESH DTOs
// ============================================

/// Result of a manual refresh
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// "committed", "failed" or "skipped"
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<RowCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Rows committed per dataset
#[derive(Debug, Serialize)]
pub struct RowCounts {
    pub regions: usize,
    pub products: usize,
    pub last_month: usize,
}

impl From<RefreshOutcome> for RefreshResponse {
    fn from(outcome: RefreshOutcome) -> Self {
        match outcome {
            RefreshOutcome::Committed(stats) => Self {
                status: "committed".to_string(),
                rows: Some(RowCounts {
                    regions: stats.regions,
                    products: stats.products,
                    last_month: stats.last_month,
                }),
                duration_ms: Some(stats.duration_ms),
                error: None,
            },
            RefreshOutcome::Failed(message) => Self {
                status: "failed".to_string(),
                rows: None,
                duration_ms: None,
                error: Some(message),
            },
            RefreshOutcome::Skipped => Self {
                status: "skipped".to_string(),
                rows: None,
                duration_ms: None,
                error: None,
            },
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy", "degraded" or "starting"
    pub status: String,
    pub refreshing: bool,
    pub last_refreshed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    pub uptime_seconds: u64,
    pub version: String,
}
