//! Askpool HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use askpool::answer::{AnswerEngine, EngineOptions};
use askpool::config::Config;
use askpool::embedding::HttpEmbedder;
use askpool::gateway::create_router;
use askpool::vectordb::{DEFAULT_COLLECTION_NAME, QdrantStore};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        qdrant_url = %config.qdrant_url,
        "askpool starting"
    );

    let api_key = std::env::var("ASKPOOL_EMBED_API_KEY").ok();
    if api_key.is_none() {
        tracing::warn!("ASKPOOL_EMBED_API_KEY not set, embedding requests go out unauthenticated");
    }

    let embedder = HttpEmbedder::new(
        config.embed_url.clone(),
        config.embed_model.clone(),
        config.embedding_dim,
        api_key,
    );

    let store = QdrantStore::new(
        &config.qdrant_url,
        DEFAULT_COLLECTION_NAME,
        config.embedding_dim as u64,
    )
    .await?;
    store.health_check().await?;
    store.ensure_collection().await?;

    let engine = AnswerEngine::new(
        embedder,
        store,
        config.ranking_config(),
        EngineOptions {
            review_vector_search: config.review_vector_search,
            fail_soft: config.fail_soft,
        },
    );

    let router = create_router(Arc::new(engine));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
    }
    tracing::info!("shutdown signal received");
}
