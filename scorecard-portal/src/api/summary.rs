//! Summary metrics endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use scorecard_common::loader::SkippedRow;
use scorecard_common::summary::{self, HistogramBin, Metrics, StatusCount};
use scorecard_common::{filter, FilterCriteria};
use serde::Serialize;

use crate::AppState;

/// Metrics for the filtered set plus whole-dataset chart data
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub metrics: Metrics,
    pub score_histogram: Vec<HistogramBin>,
    pub status_breakdown: Vec<StatusCount>,
    pub skipped_rows: Vec<SkippedRow>,
    pub load_error: Option<String>,
}

/// GET /api/summary
pub async fn get_summary(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<SummaryResponse> {
    let criteria = FilterCriteria::from_query_pairs(&pairs);
    let records = &state.dataset.records;
    let matching = filter::apply(records, &criteria);

    Json(SummaryResponse {
        metrics: summary::metrics(&matching, records.len()),
        score_histogram: summary::score_histogram(records),
        status_breakdown: summary::status_breakdown(records),
        skipped_rows: state.dataset.report.skipped.clone(),
        load_error: state.load_error.as_deref().map(str::to_string),
    })
}
