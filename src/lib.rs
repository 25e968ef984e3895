//! Askpool library crate (used by the server binary and integration tests).
//!
//! Answers free-text customer questions by retrieving semantically similar
//! passages from two disjoint pools — FAQ content and customer reviews —
//! and deciding which pool (if either) actually answers the question.
//!
//! # Module map
//!
//! - [`candidate`] - Retrieval rows → typed candidates with bucket tags
//! - [`review`] - Structured field extraction from review passages
//! - [`lexical`] - Keyword-overlap scoring
//! - [`ranking`] - FAQ and review ranking pipelines (threshold, boost, rescue)
//! - [`answer`] - FAQ-first answer selection state machine
//! - [`embedding`], [`vectordb`] - External collaborators behind traits
//! - [`gateway`] - Thin HTTP layer
//! - [`config`] - Environment-backed configuration
//!
//! Mock collaborators are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod answer;
pub mod candidate;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod lexical;
pub mod ranking;
pub mod review;
pub mod vectordb;

pub use answer::{
    AnswerEngine, AnswerError, AnswerRequest, AnswerResponse, AnswerResult, AnswerSource,
    EngineOptions, FaqOutcome, FaqResult, NOT_FOUND_MESSAGE, ReviewOutcome, ReviewResult,
    UNAVAILABLE_MESSAGE,
};
pub use candidate::{Bucket, Candidate, normalize, normalize_all, resolve_bucket};
pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_EMBEDDING_DIM, DEFAULT_TOP_K, DimConfig, DimValidationError, MAX_TOP_K,
    validate_embedding_dim,
};
pub use embedding::{EmbeddingError, EmbeddingProvider, HttpEmbedder};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use ranking::{RankingConfig, ScoredFaq, ScoredReview, rank_faq, rank_reviews};
pub use review::{ParsedReview, parse};
pub use vectordb::{
    DEFAULT_COLLECTION_NAME, Pool, QdrantStore, RetrievedRow, RowTags, VectorStore,
    VectorStoreError,
};
#[cfg(any(test, feature = "mock"))]
pub use vectordb::{MockPassage, MockVectorStore, cosine_similarity};
