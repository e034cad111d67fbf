//! # Scorecard Common Library
//!
//! Shared code for the reproducibility scorecard portal:
//! - Paper scorecard data model
//! - CSV loading and derived fields (normalized score, status, repo link)
//! - Filter and search criteria
//! - Summary metrics and chart data
//! - Configuration loading

pub mod config;
pub mod error;
pub mod filter;
pub mod links;
pub mod loader;
pub mod model;
pub mod scoring;
pub mod summary;

pub use error::{Error, Result};
pub use filter::FilterCriteria;
pub use loader::{Dataset, LoadOptions};
pub use model::{Category, PaperRecord, RubricScores, Status};
