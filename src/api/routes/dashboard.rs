//! Dashboard Routes
//!
//! The HTML page and its refresh control, plus the JSON mirror.
//!
//! - GET / - Dashboard page
//! - POST /refresh - Refresh, then redirect back to the page
//! - GET /api/v1/dashboard - Dashboard state as JSON

use axum::{
    extract::State,
    response::{Html, Redirect},
    Json,
};
use chrono::Local;
use std::sync::Arc;

use crate::api::dto::DashboardResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dashboard::{render_html, Page};

/// GET /
///
/// Renders the page for the current state. The footer timestamp is the
/// render time.
pub async fn page(State(state): State<Arc<AppState>>) -> Html<String> {
    let snapshot = state.view.snapshot();
    let page = Page::build(&snapshot);
    Html(render_html(&page, &state.heading, Local::now()))
}

/// POST /refresh
///
/// Runs a refresh cycle to completion, then sends the browser back to the
/// page with `303 See Other`. A trigger that arrives while a cycle is
/// running is ignored.
pub async fn refresh_page(State(state): State<Arc<AppState>>) -> ApiResult<Redirect> {
    let outcome = state.view.spawn_refresh().await?;
    tracing::debug!(?outcome, "Refresh triggered from page");
    Ok(Redirect::to("/"))
}

/// GET /api/v1/dashboard
pub async fn snapshot(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    Json(state.view.snapshot().into())
}
