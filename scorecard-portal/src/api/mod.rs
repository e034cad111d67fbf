//! HTTP API handlers for scorecard-portal

pub mod buildinfo;
pub mod error;
pub mod health;
pub mod papers;
pub mod summary;
pub mod ui;

pub use buildinfo::get_build_info;
pub use error::ApiError;
pub use health::health_routes;
pub use papers::{get_paper, list_papers};
pub use summary::get_summary;
pub use ui::ui_routes;
