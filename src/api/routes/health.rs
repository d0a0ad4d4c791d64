//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (dashboard has data to show)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 once a refresh cycle has committed and the latest cycle did
/// not fail.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    let snapshot = state.view.snapshot();
    if snapshot.committed_cycles > 0 && snapshot.error.is_none() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status with refresh details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let snapshot = state.view.snapshot();

    let status = if snapshot.error.is_some() {
        "degraded"
    } else if snapshot.committed_cycles == 0 {
        "starting"
    } else {
        "healthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        refreshing: state.view.is_refreshing(),
        last_refreshed: snapshot.last_refreshed.map(|t| t.to_rfc3339()),
        last_error: snapshot.error,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }
}
