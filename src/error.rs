use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::{embedder::EmbeddingError, similarity::DimensionMismatch};

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<DimensionMismatch> for AppError {
    fn from(err: DimensionMismatch) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Provider and model details stay in the logs
        let (status, message) = match &self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Embedding(EmbeddingError::Encoding(_)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Text could not be embedded".to_string(),
            ),
            AppError::Embedding(EmbeddingError::ModelUnavailable(_)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Embedding model unavailable".to_string(),
            ),
            AppError::ExternalApi(_) | AppError::HttpClient(_) => (
                StatusCode::BAD_GATEWAY,
                "Upstream video search failed".to_string(),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
