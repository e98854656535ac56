//! Sentence embedding provider.
//!
//! The production implementation wraps a fastembed `TextEmbedding` model that is
//! loaded once at startup and shared read-only across requests. The `Embedder`
//! trait is the seam the ranking engine depends on, so tests can substitute a
//! deterministic embedding function.

use fastembed::{InitOptions, TextEmbedding};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Dense vector representation of a piece of text
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.0
    }
}

/// Error type for embedding operations
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    /// The model could not be loaded. Fatal at startup.
    #[error("Embedding model unavailable: {0}")]
    ModelUnavailable(String),

    /// The model rejected a single input. Recoverable per item.
    #[error("Encoding failed: {0}")]
    Encoding(String),
}

/// Converts text into fixed-dimension vectors
#[cfg_attr(test, mockall::automock)]
pub trait Embedder: Send + Sync {
    /// Embed a single text. Deterministic for identical input and model.
    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError>;

    /// Dimensionality of every vector this embedder produces
    fn dimensions(&self) -> usize;

    /// Model identifier for logging
    fn model_name(&self) -> &str;
}

/// fastembed-backed embedder.
/// Uses a Mutex because fastembed's embed() requires &mut self, so all
/// embeddings in the process run one at a time on a single model instance.
/// Throughput is bounded by that one model; concurrent requests queue on the
/// lock rather than run in parallel.
pub struct FastEmbedder {
    model: Mutex<TextEmbedding>,
    model_name: String,
    dimensions: usize,
}

impl FastEmbedder {
    /// Loads the named model from `cache_dir`, downloading it there on first use.
    ///
    /// Any failure, including an unknown model name, is reported as
    /// `ModelUnavailable`.
    pub fn new(model_name: &str, cache_dir: PathBuf) -> Result<Self, EmbeddingError> {
        let model_enum = parse_model_name(model_name)?;

        std::fs::create_dir_all(&cache_dir).map_err(|e| {
            EmbeddingError::ModelUnavailable(format!(
                "Failed to create model cache directory {}: {}",
                cache_dir.display(),
                e
            ))
        })?;

        let options = InitOptions::new(model_enum)
            .with_cache_dir(cache_dir)
            .with_show_download_progress(false);

        let mut model = TextEmbedding::try_new(options)
            .map_err(|e| EmbeddingError::ModelUnavailable(e.to_string()))?;

        let dimensions = probe_dimensions(&mut model)?;

        tracing::info!(model = %model_name, dimensions, "Embedding model loaded");

        Ok(Self {
            model: Mutex::new(model),
            model_name: model_name.to_string(),
            dimensions,
        })
    }
}

impl Embedder for FastEmbedder {
    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let mut model = lock_model(&self.model);

        let embeddings = model
            .embed(vec![text], None)
            .map_err(|e| EmbeddingError::Encoding(e.to_string()))?;

        embeddings
            .into_iter()
            .next()
            .map(Embedding::new)
            .ok_or_else(|| EmbeddingError::Encoding("No embedding returned".to_string()))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Acquires the model lock, recovering it if a previous embedding panicked.
///
/// Loaded weights are never mutated after startup, so a poisoned guard still
/// holds a usable model.
fn lock_model<T>(model: &Mutex<T>) -> MutexGuard<'_, T> {
    model.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("Embedding model lock was poisoned, recovering");
        PoisonError::into_inner(poisoned)
    })
}

/// Parse model name string to fastembed enum.
fn parse_model_name(name: &str) -> Result<fastembed::EmbeddingModel, EmbeddingError> {
    match name.to_lowercase().as_str() {
        "all-minilm-l6-v2" | "sentence-transformers/all-minilm-l6-v2" => {
            Ok(fastembed::EmbeddingModel::AllMiniLML6V2)
        }
        "all-minilm-l6-v2-q" => Ok(fastembed::EmbeddingModel::AllMiniLML6V2Q),
        "all-minilm-l12-v2" | "sentence-transformers/all-minilm-l12-v2" => {
            Ok(fastembed::EmbeddingModel::AllMiniLML12V2)
        }
        "bge-small-en-v1.5" => Ok(fastembed::EmbeddingModel::BGESmallENV15),
        "bge-base-en-v1.5" => Ok(fastembed::EmbeddingModel::BGEBaseENV15),
        _ => Err(EmbeddingError::ModelUnavailable(format!(
            "Unknown model: {}. Supported models: all-MiniLM-L6-v2, all-MiniLM-L12-v2, bge-small-en-v1.5, bge-base-en-v1.5",
            name
        ))),
    }
}

/// Probe the model to determine embedding dimensions.
fn probe_dimensions(model: &mut TextEmbedding) -> Result<usize, EmbeddingError> {
    let probe = model.embed(vec!["probe"], None).map_err(|e| {
        EmbeddingError::ModelUnavailable(format!("Failed to probe dimensions: {}", e))
    })?;

    probe
        .first()
        .map(|v| v.len())
        .ok_or_else(|| EmbeddingError::ModelUnavailable("Model returned no embedding".to_string()))
}
