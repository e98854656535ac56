use crate::{
    error::AppResult,
    models::{Candidate, SearchRequest},
};

pub mod youtube;

/// Trait for external video search providers
///
/// A provider answers a keyword query with an ordered list of candidate videos.
/// Errors are returned as-is; degrading them to an empty pool is the
/// retriever's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait VideoSearchProvider: Send + Sync {
    /// Search videos matching the request, in provider relevance order
    async fn search_videos(&self, request: &SearchRequest) -> AppResult<Vec<Candidate>>;

    /// Largest page the provider serves in a single call
    fn max_page_size(&self) -> usize;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
