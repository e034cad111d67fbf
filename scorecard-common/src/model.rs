//! Paper scorecard data model
//!
//! One [`PaperRecord`] per valid CSV row. Records are built once by the
//! loader and never mutated afterwards.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Lowest valid rubric rating
pub const RATING_MIN: u8 = 1;
/// Highest valid rubric rating
pub const RATING_MAX: u8 = 4;

/// Narrow a raw rating to `u8` if it lies within 1–4
pub fn check_rating(value: u32) -> Option<u8> {
    u8::try_from(value)
        .ok()
        .filter(|v| (RATING_MIN..=RATING_MAX).contains(v))
}

/// The four rubric categories every paper is rated on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "Code & Environment")]
    CodeEnvironment,
    #[serde(rename = "Documentation & Transparency")]
    DocumentationTransparency,
    #[serde(rename = "Data & Model Reuse")]
    DataModelReuse,
    #[serde(rename = "Community Engagement")]
    CommunityEngagement,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 4] = [
        Category::CodeEnvironment,
        Category::DocumentationTransparency,
        Category::DataModelReuse,
        Category::CommunityEngagement,
    ];

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Category::CodeEnvironment => "Code & Environment",
            Category::DocumentationTransparency => "Documentation & Transparency",
            Category::DataModelReuse => "Data & Model Reuse",
            Category::CommunityEngagement => "Community Engagement",
        }
    }

    /// CSV header names accepted for this category, preferred name first
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Category::CodeEnvironment => &["Availability of Code and Software"],
            Category::DocumentationTransparency => &["Documentation Quality"],
            Category::DataModelReuse => &["Dataset Availability", "Availability of Datasets"],
            Category::CommunityEngagement => &["Community Engagement"],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Four validated 1–4 ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RubricScores {
    pub code_environment: u8,
    pub documentation_transparency: u8,
    pub data_model_reuse: u8,
    pub community_engagement: u8,
}

impl RubricScores {
    /// Build from ratings in [`Category::ALL`] order, rejecting anything outside 1–4
    pub fn new(ratings: [u8; 4]) -> Result<Self> {
        for (category, rating) in Category::ALL.iter().zip(ratings) {
            if check_rating(u32::from(rating)).is_none() {
                return Err(Error::InvalidInput(format!(
                    "{} rating {} outside {}-{}",
                    category, rating, RATING_MIN, RATING_MAX
                )));
            }
        }

        Ok(Self {
            code_environment: ratings[0],
            documentation_transparency: ratings[1],
            data_model_reuse: ratings[2],
            community_engagement: ratings[3],
        })
    }

    /// Rating for one category
    pub fn get(&self, category: Category) -> u8 {
        match category {
            Category::CodeEnvironment => self.code_environment,
            Category::DocumentationTransparency => self.documentation_transparency,
            Category::DataModelReuse => self.data_model_reuse,
            Category::CommunityEngagement => self.community_engagement,
        }
    }

    /// Sum of the four ratings (4–16)
    pub fn total(&self) -> u8 {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// Reproducibility classification label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Status {
    #[serde(rename = "Highly Reproducible")]
    HighlyReproducible,
    #[serde(rename = "Partially Reproducible")]
    PartiallyReproducible,
    #[serde(rename = "Issues Present")]
    IssuesPresent,
    #[serde(rename = "Not Reproducible")]
    NotReproducible,
}

impl Status {
    /// All statuses, best first
    pub const ALL: [Status; 4] = [
        Status::HighlyReproducible,
        Status::PartiallyReproducible,
        Status::IssuesPresent,
        Status::NotReproducible,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Status::HighlyReproducible => "Highly Reproducible",
            Status::PartiallyReproducible => "Partially Reproducible",
            Status::IssuesPresent => "Issues Present",
            Status::NotReproducible => "Not Reproducible",
        }
    }

    /// Chip colour used by the UI
    pub fn color(self) -> &'static str {
        match self {
            Status::HighlyReproducible => "#22c55e",
            Status::PartiallyReproducible => "#facc15",
            Status::IssuesPresent => "#f97316",
            Status::NotReproducible => "#ef4444",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = Error;

    /// Case-insensitive match on the display label
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Status::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidInput(format!("Unknown status: {}", wanted)))
    }
}

/// Score and notes for one scored CSV column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionNote {
    /// Display name of the criterion
    pub name: String,
    /// Rating given for this criterion, if the cell carried one
    pub score: Option<u32>,
    /// Free-text notes for this criterion
    pub notes: String,
}

/// Per-paper scorecard, one per valid CSV row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaperRecord {
    /// Paper file name without the `.pdf` extension
    pub paper_id: String,
    /// Paper id with underscores turned into spaces
    pub title: String,
    pub rubric: RubricScores,
    /// Rubric total rescaled to 0–100
    pub normalized_score: f64,
    pub status: Status,
    pub conference: String,
    pub notes: String,
    /// Repository link found in the notes, if any
    pub repo_url: Option<String>,
    /// Link to the paper itself when a link base is configured
    pub paper_url: Option<String>,
    /// Non-empty per-criterion notes in column order
    pub criteria: Vec<CriterionNote>,
}
