//! scorecard-portal library - Reproducibility scorecard web portal
//!
//! Serves filterable paper cards and summary metrics over a dataset loaded
//! once from the scorecard CSV.

use axum::Router;
use scorecard_common::config::PortalConfig;
use scorecard_common::{Dataset, Error};
use std::path::Path;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

pub mod api;
pub mod pagination;

/// Display settings taken from the portal configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiSettings {
    /// Paper cards shown before "View all"
    pub preview_count: usize,
    /// Default records per page on the JSON API
    pub page_size: usize,
}

impl From<&PortalConfig> for UiSettings {
    fn from(config: &PortalConfig) -> Self {
        Self {
            preview_count: config.preview_count,
            page_size: config.page_size,
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self::from(&PortalConfig::default())
    }
}

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Records loaded at startup (read-only)
    pub dataset: Arc<Dataset>,
    /// Why the dataset is empty, when loading failed
    pub load_error: Option<Arc<str>>,
    pub settings: UiSettings,
}

impl AppState {
    /// Create new application state
    pub fn new(dataset: Dataset, settings: UiSettings) -> Self {
        Self {
            dataset: Arc::new(dataset),
            load_error: None,
            settings,
        }
    }

    /// Create state from a load attempt
    ///
    /// A failed load leaves the portal running with an empty dataset and a
    /// user-visible error banner.
    pub fn from_load_result(
        result: Result<Dataset, Error>,
        source: &Path,
        settings: UiSettings,
    ) -> Self {
        match result {
            Ok(dataset) => {
                if dataset.is_empty() {
                    warn!("No valid papers found in {}", source.display());
                }
                Self::new(dataset, settings)
            }
            Err(e) => {
                error!("Failed to load {}: {}", source.display(), e);
                Self {
                    dataset: Arc::new(Dataset::empty(source)),
                    load_error: Some(Arc::from(e.to_string())),
                    settings,
                }
            }
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let api = Router::new()
        .route("/api/papers", get(api::list_papers))
        .route("/api/papers/:id", get(api::get_paper))
        .route("/api/summary", get(api::get_summary))
        .route("/api/buildinfo", get(api::get_build_info));

    Router::new()
        .merge(api::ui_routes())
        .merge(api)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
