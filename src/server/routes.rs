use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::model::SearchResponse;
use crate::server::{
    error::{ApiError, Result},
    upstream::CatalogClient,
};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogClient>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

/// GET /api/search?q=<term>
///
/// An empty or missing term fails before any upstream contact.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    let query = params.q.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(ApiError::MissingQuery);
    }

    info!("Searching catalog for: {query}");
    let results = state.catalog.search_songs(query).await?;

    Ok(Json(SearchResponse {
        result_count: results.len(),
        results,
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
}

/// GET /api/health - liveness, no upstream dependency.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        service: "Music Search API".to_string(),
    })
}

/// Fallback for anything that matches neither a route nor a static file.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Endpoint not found" })),
    )
}
