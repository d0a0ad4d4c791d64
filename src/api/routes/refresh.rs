//! Refresh Route
//!
//! - POST /api/v1/refresh - Trigger a refresh cycle and report its outcome

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::RefreshResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// POST /api/v1/refresh
///
/// The cycle runs on its own task, so it still commits if the client
/// disconnects. A failed cycle is reported in the body, not as an HTTP error.
pub async fn trigger_refresh(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RefreshResponse>> {
    let outcome = state.view.spawn_refresh().await?;
    Ok(Json(outcome.into()))
}
