//! UI Routes - HTML pages for the portal
//!
//! Pages are rendered on the server for every request; filter state lives
//! entirely in the query string.
//!
//! - **Portal page** (`portal_page`): filters, metrics, paper cards, trends
//! - **Paper page** (`paper_page`): one paper's full scorecard
//! - **HTML helpers** (`html`): escaping, formatting, page shell

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use scorecard_common::{filter, FilterCriteria};
use tracing::debug;

use crate::AppState;

pub mod html;
pub mod paper_page;
pub mod portal_page;

use portal_page::{PortalView, KEY_SHOW_ALL};

/// Query key naming the paper on the detail page
pub const KEY_PAPER_ID: &str = "id";

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(portal))
        .route("/paper", get(paper_detail))
}

/// GET /
///
/// Portal page filtered by the query string
pub async fn portal(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Html<String> {
    let criteria = FilterCriteria::from_query_pairs(&pairs);
    let show_all = pairs
        .iter()
        .any(|(k, v)| k == KEY_SHOW_ALL && v == "1");

    let records = &state.dataset.records;
    let matching = filter::apply(records, &criteria);
    debug!(
        "Portal rerun: {} of {} papers match {:?}",
        matching.len(),
        records.len(),
        criteria
    );

    let view = PortalView::build(
        records,
        &criteria,
        &matching,
        state.load_error.as_deref(),
        state.settings.preview_count,
        show_all,
    );
    Html(portal_page::render(&view))
}

/// GET /paper?id=...
///
/// Full scorecard for one paper; other query keys are carried back to the
/// portal page as its filters.
pub async fn paper_detail(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let paper_id = pairs
        .iter()
        .find(|(k, _)| k == KEY_PAPER_ID)
        .map(|(_, v)| v.as_str())
        .unwrap_or("");
    let back_pairs: Vec<(String, String)> = pairs
        .iter()
        .filter(|(k, _)| k != KEY_PAPER_ID)
        .cloned()
        .collect();

    match state.dataset.find(paper_id) {
        Some(record) => Html(paper_page::render(record, &back_pairs)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html(paper_page::render_not_found(paper_id)),
        )
            .into_response(),
    }
}
