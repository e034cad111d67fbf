//! Paper list and detail endpoints
//!
//! The list accepts the same filter keys as the portal page (`min`, `max`,
//! `status`, `conference`, `q`) plus `page` and `page_size`.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use scorecard_common::{filter, FilterCriteria, PaperRecord};
use serde::Serialize;

use super::error::ApiError;
use crate::{pagination::calculate_pagination, AppState};

/// Largest page size a client may ask for
pub const MAX_PAGE_SIZE: usize = 1000;

/// Paginated list of matching papers
#[derive(Debug, Serialize)]
pub struct PaperListResponse {
    pub total_results: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub papers: Vec<PaperRecord>,
}

/// Read an optional positive integer query parameter
fn positive_param(
    pairs: &[(String, String)],
    name: &'static str,
) -> Result<Option<usize>, ApiError> {
    let Some((_, raw)) = pairs.iter().rev().find(|(k, _)| k == name) else {
        return Ok(None);
    };
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(Some(value)),
        _ => Err(ApiError::InvalidParameter {
            name,
            value: raw.clone(),
        }),
    }
}

/// GET /api/papers
///
/// Returns papers matching every given filter, in file order.
pub async fn list_papers(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<PaperListResponse>, ApiError> {
    let criteria = FilterCriteria::from_query_pairs(&pairs);
    let requested_page = positive_param(&pairs, "page")?.unwrap_or(1);
    let page_size = positive_param(&pairs, "page_size")?
        .unwrap_or(state.settings.page_size)
        .min(MAX_PAGE_SIZE);

    let matching = filter::apply(&state.dataset.records, &criteria);
    let p = calculate_pagination(matching.len(), requested_page, page_size);

    Ok(Json(PaperListResponse {
        total_results: matching.len(),
        page: p.page,
        page_size: p.page_size,
        total_pages: p.total_pages,
        papers: p.slice(&matching).iter().map(|r| (*r).clone()).collect(),
    }))
}

/// GET /api/papers/:id
///
/// Returns one paper's full scorecard.
pub async fn get_paper(
    State(state): State<AppState>,
    Path(paper_id): Path<String>,
) -> Result<Json<PaperRecord>, ApiError> {
    state
        .dataset
        .find(&paper_id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::PaperNotFound(paper_id))
}
