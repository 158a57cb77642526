use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Proxy-side failure taxonomy. Everything is caught at the route boundary
/// and converted to a JSON error body; nothing is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Search query is required")]
    MissingQuery,

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingQuery => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Search query is required" }),
            ),
            ApiError::Upstream(message) => {
                tracing::error!("Search API error: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to search for songs", "message": message }),
                )
            }
            ApiError::Internal(message) => {
                tracing::error!("Unhandled error: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Something went wrong!", "message": message }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
