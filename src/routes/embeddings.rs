use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    routes::AppState,
    services::recommendations::embed_blocking,
};

#[derive(Debug, Deserialize)]
pub struct EmbedRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct EmbedResponse {
    pub model: String,
    pub dimensions: usize,
    pub embedding: Vec<f32>,
}

/// Handler returning the raw embedding of a text
pub async fn embed_text(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EmbedRequest>,
) -> AppResult<Json<EmbedResponse>> {
    if request.text.trim().is_empty() {
        return Err(AppError::InvalidInput("Text cannot be empty".to_string()));
    }

    let embedder = state.engine.embedder().clone();
    let model = embedder.model_name().to_string();
    let dimensions = embedder.dimensions();
    let embedding = embed_blocking(embedder, request.text).await?;

    Ok(Json(EmbedResponse {
        model,
        dimensions,
        embedding: embedding.into_vec(),
    }))
}
