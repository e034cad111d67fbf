//! Rubric scoring and cell parsing
//!
//! Scored CSV cells come either as a bare rating (`3`) or in the annotated
//! form `Score: 3 | Notes: free text`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{RubricScores, Status, RATING_MAX};

/// Highest possible rubric total (four categories at the top rating)
pub const MAX_TOTAL: u8 = 4 * RATING_MAX;

static SCORE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Score:\s*([0-9]+)").expect("valid score pattern")
});

static NOTES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)Notes:\s*(.*)").expect("valid notes pattern")
});

/// Rubric total rescaled to 0–100: `(total / 16) × 100`
pub fn normalized_score(rubric: &RubricScores) -> f64 {
    f64::from(rubric.total()) / f64::from(MAX_TOTAL) * 100.0
}

/// Classify a normalized score
///
/// 80+ is highly reproducible, 50–79 partially, 20–49 issues present,
/// anything lower not reproducible.
pub fn status_from_score(score: f64) -> Status {
    if score >= 80.0 {
        Status::HighlyReproducible
    } else if score >= 50.0 {
        Status::PartiallyReproducible
    } else if score >= 20.0 {
        Status::IssuesPresent
    } else {
        Status::NotReproducible
    }
}

/// Rating and notes pulled out of one scored cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScoredCell {
    pub score: Option<u32>,
    pub notes: String,
}

/// Parse a scored cell
///
/// A bare integer is the rating. Otherwise the first integer after `Score:`
/// is the rating and everything after `Notes:` is the note. Text with
/// neither marker is kept whole as the note.
pub fn parse_cell(raw: &str) -> ScoredCell {
    let text = raw.trim();
    if text.is_empty() {
        return ScoredCell::default();
    }

    if let Ok(score) = text.parse::<u32>() {
        return ScoredCell {
            score: Some(score),
            notes: String::new(),
        };
    }

    let score = SCORE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok());

    let notes = match NOTES_RE.captures(text).and_then(|caps| caps.get(1)) {
        Some(m) => m.as_str().trim().to_string(),
        None if score.is_none() => text.to_string(),
        None => String::new(),
    };

    ScoredCell { score, notes }
}
