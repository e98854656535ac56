use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::recommendations::RecommendationEngine,
};

pub mod embeddings;
pub mod recommendations;

/// Shared state handed to every handler
pub struct AppState {
    pub engine: RecommendationEngine,
    /// Result count used when a request does not specify `max_results`
    pub default_max_results: usize,
}

impl AppState {
    pub fn new(engine: RecommendationEngine, default_max_results: usize) -> Self {
        Self {
            engine,
            default_max_results,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recommend/youtube", get(recommendations::recommend_youtube))
        .route("/embed", post(embeddings::embed_text))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Semantic video recommender API is up." }))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
