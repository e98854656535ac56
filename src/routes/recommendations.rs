use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{RecencyBucket, ScoredCandidate, SearchFilters, VideoDuration},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub query: String,
    pub max_results: Option<usize>,
    pub video_duration: Option<VideoDuration>,
    pub published_after: Option<RecencyBucket>,
}

/// Handler for semantic YouTube recommendations
pub async fn recommend_youtube(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendQuery>,
) -> AppResult<Json<Vec<ScoredCandidate>>> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput("Query cannot be empty".to_string()));
    }

    let max_results = params.max_results.unwrap_or(state.default_max_results);
    let filters = SearchFilters {
        duration: params.video_duration,
        recency: params.published_after,
    };

    tracing::info!(
        request_id = %request_id,
        query = %query,
        max_results,
        video_duration = ?filters.duration,
        published_after = ?filters.recency,
        "Processing recommendation request"
    );

    let results = state.engine.recommend(query, max_results, filters).await?;

    Ok(Json(results))
}
