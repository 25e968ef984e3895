//! HTTP gateway (Axum) around the answer engine.
//!
//! Plumbing only: request parsing, CORS, tracing, and error mapping. All
//! decision logic lives in [`crate::answer`].

pub mod error;


use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::GatewayError;

use crate::answer::{AnswerEngine, AnswerRequest};
use crate::embedding::EmbeddingProvider;
use crate::vectordb::VectorStore;

/// Shared handler state: just the engine behind an `Arc`.
pub struct GatewayState<E, V> {
    pub engine: Arc<AnswerEngine<E, V>>,
}

impl<E, V> Clone for GatewayState<E, V> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

/// Builds the router over an engine.
pub fn create_router<E, V>(engine: Arc<AnswerEngine<E, V>>) -> Router
where
    E: EmbeddingProvider + 'static,
    V: VectorStore + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/v1/answers", post(answers_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(GatewayState { engine })
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (
        StatusCode::OK,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip_all)]
pub async fn answers_handler<E, V>(
    State(state): State<GatewayState<E, V>>,
    Json(request): Json<AnswerRequest>,
) -> Result<Response, GatewayError>
where
    E: EmbeddingProvider + 'static,
    V: VectorStore + 'static,
{
    let response = state.engine.answer(request).await?;
    Ok(Json(response).into_response())
}
