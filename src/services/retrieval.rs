use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::{
    models::{Candidate, SearchFilters, SearchRequest},
    services::providers::VideoSearchProvider,
};

/// Fetches the candidate pool for a query from the search provider
///
/// Provider failures never propagate: a failed, timed out, or empty search
/// yields an empty pool.
#[derive(Clone)]
pub struct CandidateRetriever {
    provider: Arc<dyn VideoSearchProvider>,
}

impl CandidateRetriever {
    pub fn new(provider: Arc<dyn VideoSearchProvider>) -> Self {
        Self { provider }
    }

    /// Retrieve up to `pool_size` candidates in provider order
    pub async fn retrieve(
        &self,
        query: &str,
        pool_size: usize,
        filters: SearchFilters,
    ) -> Vec<Candidate> {
        let request = build_request(
            query,
            pool_size.min(self.provider.max_page_size()),
            filters,
            Utc::now(),
        );

        match self.provider.search_videos(&request).await {
            Ok(candidates) => {
                tracing::debug!(
                    provider = self.provider.name(),
                    requested = request.max_items,
                    retrieved = candidates.len(),
                    "Candidate pool retrieved"
                );
                candidates
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    provider = self.provider.name(),
                    query = %query,
                    "Video search failed, using empty candidate pool"
                );
                Vec::new()
            }
        }
    }
}

/// Translates filters into a provider request; recency buckets become an
/// absolute lower bound computed from `now`
pub fn build_request(
    query: &str,
    pool_size: usize,
    filters: SearchFilters,
    now: DateTime<Utc>,
) -> SearchRequest {
    SearchRequest {
        query: query.to_string(),
        max_items: pool_size.max(1),
        duration: filters.duration,
        published_after: filters.recency.map(|bucket| bucket.published_after(now)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{RecencyBucket, VideoDuration};
    use crate::services::providers::MockVideoSearchProvider;
    use chrono::TimeZone;

    fn candidate(id: &str) -> Candidate {
        Candidate::new(id.to_string(), format!("title {}", id), String::new())
    }

    fn mock_provider() -> MockVideoSearchProvider {
        let mut provider = MockVideoSearchProvider::new();
        provider.expect_max_page_size().return_const(50usize);
        provider.expect_name().return_const("mock");
        provider
    }

    #[test]
    fn test_build_request_translates_recency() {
        let now = Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap();
        let filters = SearchFilters {
            duration: Some(VideoDuration::Short),
            recency: Some(RecencyBucket::ThisWeek),
        };

        let request = build_request("graph theory", 50, filters, now);

        assert_eq!(request.query, "graph theory");
        assert_eq!(request.max_items, 50);
        assert_eq!(request.duration, Some(VideoDuration::Short));
        assert_eq!(
            request.published_after,
            Some(Utc.with_ymd_and_hms(2025, 1, 3, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_build_request_unfiltered() {
        let request = build_request("graph theory", 0, SearchFilters::default(), Utc::now());
        assert_eq!(request.max_items, 1);
        assert_eq!(request.duration, None);
        assert_eq!(request.published_after, None);
    }

    #[tokio::test]
    async fn test_retrieve_requests_pool_capped_by_provider() {
        let mut provider = mock_provider();
        provider
            .expect_search_videos()
            .withf(|request| request.max_items == 50 && request.query == "topology")
            .times(1)
            .returning(|_| Ok(vec![candidate("a"), candidate("b")]));

        let retriever = CandidateRetriever::new(Arc::new(provider));
        let pool = retriever
            .retrieve("topology", 200, SearchFilters::default())
            .await;

        assert_eq!(pool, vec![candidate("a"), candidate("b")]);
    }

    #[tokio::test]
    async fn test_retrieve_degrades_provider_error_to_empty_pool() {
        let mut provider = mock_provider();
        provider
            .expect_search_videos()
            .returning(|_| Err(AppError::ExternalApi("quota exceeded".to_string())));

        let retriever = CandidateRetriever::new(Arc::new(provider));
        let pool = retriever.retrieve("topology", 50, SearchFilters::default()).await;

        assert!(pool.is_empty());
    }
}
