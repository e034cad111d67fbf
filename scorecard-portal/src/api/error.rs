//! JSON error responses for the API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// API errors
#[derive(Debug)]
pub enum ApiError {
    /// No paper with this id
    PaperNotFound(String),
    /// Query parameter present but unusable
    InvalidParameter { name: &'static str, value: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::PaperNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Paper not found: {}", id))
            }
            ApiError::InvalidParameter { name, value } => (
                StatusCode::BAD_REQUEST,
                format!("Invalid {} parameter: {}", name, value),
            ),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
