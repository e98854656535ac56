//! YouTube Data API v3 provider
//!
//! Uses the `search.list` endpoint restricted to videos. Only the snippet part
//! is requested, which carries title and description.

use crate::{
    error::{AppError, AppResult},
    models::{Candidate, SearchRequest, YouTubeSearchItem},
    services::providers::VideoSearchProvider,
};
use chrono::SecondsFormat;
use reqwest::Client as HttpClient;
use std::time::Duration;

/// `maxResults` upper bound accepted by `search.list`
pub const MAX_PAGE_SIZE: usize = 50;

/// Header carrying the API key, kept out of the URL so it never reaches logs
pub const API_KEY_HEADER: &str = "X-Goog-Api-Key";

#[derive(Clone)]
pub struct YouTubeProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl YouTubeProvider {
    /// Creates a provider whose calls fail after `timeout`
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }

    /// Query parameters for a search request
    fn build_query(&self, request: &SearchRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("q", request.query.clone()),
            ("type", "video".to_string()),
            ("maxResults", request.max_items.min(MAX_PAGE_SIZE).to_string()),
        ];

        if let Some(duration) = request.duration {
            params.push(("videoDuration", duration.as_api_value().to_string()));
        }

        if let Some(published_after) = request.published_after {
            params.push((
                "publishedAfter",
                published_after.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }

        params
    }
}

/// Extracts video candidates from a `search.list` body, skipping items that
/// are not videos or do not parse
fn parse_search_response(body: &serde_json::Value) -> Vec<Candidate> {
    let Some(items) = body["items"].as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            serde_json::from_value::<YouTubeSearchItem>(item.clone())
                .ok()
                .and_then(YouTubeSearchItem::into_candidate)
        })
        .collect()
}

#[async_trait::async_trait]
impl VideoSearchProvider for YouTubeProvider {
    async fn search_videos(&self, request: &SearchRequest) -> AppResult<Vec<Candidate>> {
        let url = format!("{}/search", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&self.build_query(request))
            .send()
            .await
            .map_err(|e| AppError::HttpClient(e.without_url()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "YouTube API returned status {}: {}",
                status, body
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::HttpClient(e.without_url()))?;
        let candidates = parse_search_response(&body);

        tracing::info!(
            query = %request.query,
            results = candidates.len(),
            provider = "youtube",
            "Video search completed"
        );

        Ok(candidates)
    }

    fn max_page_size(&self) -> usize {
        MAX_PAGE_SIZE
    }

    fn name(&self) -> &'static str {
        "youtube"
    }
}
