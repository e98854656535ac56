use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use videorec_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{providers::youtube::YouTubeProvider, FastEmbedder, RecommendationEngine},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    // The model must be ready before any request is accepted
    let embedder = tokio::task::spawn_blocking({
        let model = config.embedding_model.clone();
        let cache_dir = config.embedding_cache_dir.clone();
        move || FastEmbedder::new(&model, cache_dir)
    })
    .await
    .context("Embedding model loader panicked")?
    .context("Failed to load embedding model")?;

    let provider = YouTubeProvider::new(
        config.youtube_api_key.clone(),
        config.youtube_api_url.clone(),
        config.youtube_timeout(),
    )
    .context("Failed to build YouTube client")?;

    let engine = RecommendationEngine::new(
        Arc::new(embedder),
        Arc::new(provider),
        config.candidate_pool_size,
    );
    let state = Arc::new(AppState::new(engine, config.default_max_results));

    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        addr = %addr,
        model = %config.embedding_model,
        pool_size = config.candidate_pool_size,
        "Server running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
