use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Candidate, ScoredCandidate, SearchFilters},
    services::{
        embedder::{Embedder, Embedding},
        providers::VideoSearchProvider,
        retrieval::CandidateRetriever,
        similarity::{cosine_similarity, DimensionMismatch},
    },
};

/// Candidates fetched per request before re-ranking
pub const DEFAULT_POOL_SIZE: usize = 50;

/// Semantic re-ranking of keyword search results
///
/// Retrieves a wide candidate pool for the query, embeds every candidate's
/// title and description, and orders them by cosine similarity to the query
/// embedding. The pool is always fetched at full width; `max_results` only
/// truncates the ranked output.
#[derive(Clone)]
pub struct RecommendationEngine {
    embedder: Arc<dyn Embedder>,
    retriever: CandidateRetriever,
    pool_size: usize,
}

impl RecommendationEngine {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        provider: Arc<dyn VideoSearchProvider>,
        pool_size: usize,
    ) -> Self {
        Self {
            embedder,
            retriever: CandidateRetriever::new(provider),
            pool_size,
        }
    }

    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }

    /// Recommend up to `max_results` videos for `query`, best match first
    ///
    /// An empty or failed retrieval yields an empty list. Candidates whose
    /// text cannot be embedded are kept with a score of 0.0.
    pub async fn recommend(
        &self,
        query: &str,
        max_results: usize,
        filters: SearchFilters,
    ) -> AppResult<Vec<ScoredCandidate>> {
        // The query is embedded once and reused for every candidate
        let query_embedding = embed_blocking(self.embedder.clone(), query.to_string()).await?;

        let candidates = self
            .retriever
            .retrieve(query, self.pool_size, filters)
            .await;

        if candidates.is_empty() {
            tracing::info!(query = %query, "No candidates retrieved");
            return Ok(Vec::new());
        }

        let pool_size = candidates.len();
        let embedder = self.embedder.clone();
        let scored = tokio::task::spawn_blocking(move || {
            score_candidates(embedder.as_ref(), &query_embedding, candidates)
        })
        .await
        .map_err(|e| AppError::Internal(format!("Scoring task failed: {}", e)))??;

        let ranked = rank(scored, max_results);

        tracing::info!(
            query = %query,
            pool_size,
            results = ranked.len(),
            top_score = ranked.first().map(|c| c.score),
            "Recommendations ranked"
        );

        Ok(ranked)
    }
}

/// Run a single embedding off the async runtime
pub async fn embed_blocking(embedder: Arc<dyn Embedder>, text: String) -> AppResult<Embedding> {
    let embedding = tokio::task::spawn_blocking(move || embedder.embed(&text))
        .await
        .map_err(|e| AppError::Internal(format!("Embedding task failed: {}", e)))??;
    Ok(embedding)
}

/// Scores each candidate against the query embedding, preserving input order
///
/// A candidate whose text fails to embed is scored 0.0 and kept.
pub fn score_candidates(
    embedder: &dyn Embedder,
    query_embedding: &Embedding,
    candidates: Vec<Candidate>,
) -> Result<Vec<ScoredCandidate>, DimensionMismatch> {
    candidates
        .into_iter()
        .map(|candidate| match embedder.embed(&candidate.scoring_text()) {
            Ok(embedding) => {
                let score = cosine_similarity(query_embedding, &embedding)?;
                Ok(ScoredCandidate::new(candidate, score))
            }
            Err(e) => {
                tracing::warn!(
                    video_id = %candidate.video_id,
                    error = %e,
                    "Candidate embedding failed, scoring as 0.0"
                );
                Ok(ScoredCandidate::unscored(candidate))
            }
        })
        .collect()
}

/// Stable sort by score descending, then truncate to `max_results`
pub fn rank(mut scored: Vec<ScoredCandidate>, max_results: usize) -> Vec<ScoredCandidate> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(max_results);
    scored
}
