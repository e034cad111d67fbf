//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response: status, module name, version and dataset size
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub papers_loaded: usize,
}

/// GET /health
///
/// Health check endpoint for monitoring. Reports "degraded" when the data
/// file could not be loaded; the portal still serves its empty state.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.load_error.is_some() {
        "degraded"
    } else {
        "ok"
    };

    Json(HealthResponse {
        status: status.to_string(),
        module: "scorecard-portal".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        papers_loaded: state.dataset.len(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
