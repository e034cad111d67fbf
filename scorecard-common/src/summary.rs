//! Summary metrics and chart data
//!
//! Metrics describe the filtered set; the histogram and status breakdown
//! describe the whole dataset.

use serde::Serialize;

use crate::model::{PaperRecord, Status};

/// Number of equal-width histogram bins over 0–100
pub const HISTOGRAM_BINS: usize = 10;

/// Headline numbers shown above the paper list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    /// Mean normalized score of the filtered set, absent when it is empty
    pub average_score: Option<f64>,
    /// Highly reproducible papers in the filtered set
    pub highly_reproducible: usize,
    /// Papers in the filtered set
    pub matching: usize,
    /// Papers in the whole dataset
    pub total_papers: usize,
}

/// Compute headline metrics
pub fn metrics(filtered: &[&PaperRecord], total_papers: usize) -> Metrics {
    let average_score = if filtered.is_empty() {
        None
    } else {
        let sum: f64 = filtered.iter().map(|r| r.normalized_score).sum();
        Some(sum / filtered.len() as f64)
    };

    Metrics {
        average_score,
        highly_reproducible: filtered
            .iter()
            .filter(|r| r.status == Status::HighlyReproducible)
            .count(),
        matching: filtered.len(),
        total_papers,
    }
}

/// One histogram bin, `[lower, upper)` except the last which is closed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Distribution of normalized scores
pub fn score_histogram(records: &[PaperRecord]) -> Vec<HistogramBin> {
    let width = 100.0 / HISTOGRAM_BINS as f64;
    let mut bins: Vec<HistogramBin> = (0..HISTOGRAM_BINS)
        .map(|i| HistogramBin {
            lower: i as f64 * width,
            upper: (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for record in records {
        let score = record.normalized_score.clamp(0.0, 100.0);
        let idx = ((score / width).floor() as usize).min(HISTOGRAM_BINS - 1);
        bins[idx].count += 1;
    }

    bins
}

/// Papers per status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: Status,
    pub count: usize,
}

/// Count per status in label order, zero counts omitted
pub fn status_breakdown(records: &[PaperRecord]) -> Vec<StatusCount> {
    Status::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: records.iter().filter(|r| r.status == status).count(),
        })
        .filter(|sc| sc.count > 0)
        .collect()
}
