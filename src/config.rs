use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::services::{providers::youtube::MAX_PAGE_SIZE, recommendations::DEFAULT_POOL_SIZE};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// YouTube Data API key
    pub youtube_api_key: String,

    /// YouTube Data API base URL
    #[serde(default = "default_youtube_api_url")]
    pub youtube_api_url: String,

    /// Timeout for a single video search call, in milliseconds
    #[serde(default = "default_youtube_timeout_ms")]
    pub youtube_timeout_ms: u64,

    /// Sentence embedding model identifier
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Directory holding (or receiving) the embedding model files
    pub embedding_cache_dir: PathBuf,

    /// Candidates fetched from the provider before re-ranking
    #[serde(default = "default_candidate_pool_size")]
    pub candidate_pool_size: usize,

    /// Results returned when the caller does not ask for a count
    #[serde(default = "default_max_results")]
    pub default_max_results: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_youtube_api_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_youtube_timeout_ms() -> u64 {
    10_000
}

fn default_embedding_model() -> String {
    "all-MiniLM-L6-v2".to_string()
}

fn default_candidate_pool_size() -> usize {
    DEFAULT_POOL_SIZE
}

fn default_max_results() -> usize {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?
            .validated()
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_pairs<I>(pairs: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(pairs)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?
            .validated()
    }

    fn validated(mut self) -> anyhow::Result<Self> {
        if self.youtube_api_key.trim().is_empty() {
            anyhow::bail!("YOUTUBE_API_KEY must not be empty");
        }
        if self.youtube_timeout_ms == 0 {
            anyhow::bail!("YOUTUBE_TIMEOUT_MS must be greater than zero");
        }
        self.candidate_pool_size = self.candidate_pool_size.clamp(1, MAX_PAGE_SIZE);
        Ok(self)
    }

    pub fn youtube_timeout(&self) -> Duration {
        Duration::from_millis(self.youtube_timeout_ms)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
