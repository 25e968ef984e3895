use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::candidate::Candidate;
use crate::embedding::EmbeddingError;
use crate::ranking::{ScoredFaq, ScoredReview};
use crate::vectordb::VectorStoreError;

/// Incoming question, as handed over by the HTTP layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    /// Free-text customer question.
    pub query: String,
    /// Requested candidate count; clamped to `[1, MAX_TOP_K]`.
    #[serde(default)]
    pub top_k: Option<usize>,
    /// Skip the FAQ search and answer from reviews directly.
    #[serde(default)]
    pub show_reviews: bool,
    /// Surface internals and propagate upstream failures.
    #[serde(default)]
    pub debug: bool,
}

impl AnswerRequest {
    /// Creates a plain request for `query` with default options.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: None,
            show_reviews: false,
            debug: false,
        }
    }

    /// Requests reviews directly, bypassing the FAQ search.
    pub fn reviews_only(mut self) -> Self {
        self.show_reviews = true;
        self
    }

    /// Enables debug output.
    pub fn with_debug(mut self) -> Self {
        self.debug = true;
        self
    }
}

/// Which pool (if either) answered the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnswerSource {
    /// FAQ content answered.
    #[serde(rename = "faq")]
    Faq,
    /// Customer review content answered.
    #[serde(rename = "google-review")]
    GoogleReview,
    /// Neither pool qualified.
    #[serde(rename = "none")]
    None,
}

/// A ranked FAQ passage in the response payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqResult {
    /// Passage text.
    pub content: String,
    /// Raw (unboosted) similarity.
    pub similarity: f32,
}

/// A ranked review in the response payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewResult {
    /// Reviewer display name, if parsed.
    pub reviewer: Option<String>,
    /// Star rating, if parsed.
    pub rating: Option<f32>,
    /// Review date, if parsed.
    pub date: Option<String>,
    /// Review body.
    pub text: String,
}

/// One result entry; the variant tracks [`AnswerSource`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnswerResult {
    /// FAQ passage.
    Faq(FaqResult),
    /// Parsed review.
    Review(ReviewResult),
}

/// Final answer payload handed back to the HTTP layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    /// Winning pool.
    pub source: AnswerSource,
    /// Ranked results, capped by the per-pool return limits.
    pub results: Vec<AnswerResult>,
    /// Set on FAQ hits: the caller may follow up with `showReviews`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_show_reviews: Option<bool>,
    /// User-facing message for `source=none` responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Internals, present only for debug requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugInfo>,
}

/// Debug view of a query's journey through the state machine.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    /// State transitions in order.
    pub transitions: Vec<String>,
    /// All normalized FAQ-pool candidates (including `unknown` buckets,
    /// which never reach the ranking paths).
    pub faq_candidates: Vec<Candidate>,
    /// All normalized review-pool candidates.
    pub review_candidates: Vec<Candidate>,
}

/// Outcome of the FAQ pipeline. A miss is a normal value, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum FaqOutcome {
    /// At least one ranked result (threshold or rescue).
    Hit(Vec<ScoredFaq>),
    /// Nothing qualified.
    Miss,
}

/// Outcome of the review pipeline. A miss is a normal value, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewOutcome {
    /// At least one positively scored review.
    Hit(Vec<ScoredReview>),
    /// Nothing scored.
    Miss,
}

/// States of the answer selection machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerState {
    Start,
    FaqSearch,
    FaqHit,
    FaqMiss,
    ReviewsOnly,
    ReviewSearch,
    ReviewHit,
    ReviewMiss,
    Done,
}

impl AnswerState {
    /// Short uppercase label used in debug transition lists.
    pub fn label(self) -> &'static str {
        match self {
            AnswerState::Start => "START",
            AnswerState::FaqSearch => "FAQ_SEARCH",
            AnswerState::FaqHit => "FAQ_HIT",
            AnswerState::FaqMiss => "FAQ_MISS",
            AnswerState::ReviewsOnly => "REVIEWS_ONLY",
            AnswerState::ReviewSearch => "REVIEW_SEARCH",
            AnswerState::ReviewHit => "REVIEW_HIT",
            AnswerState::ReviewMiss => "REVIEW_MISS",
            AnswerState::Done => "DONE",
        }
    }
}

impl std::fmt::Display for AnswerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
/// Errors surfaced by the answer engine.
pub enum AnswerError {
    /// Empty query, rejected before any upstream call.
    #[error("query must not be empty")]
    InvalidInput,

    /// Embedding generation failed.
    #[error("embedding provider unavailable: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Vector store query failed.
    #[error("vector store unavailable: {0}")]
    VectorStore(#[from] VectorStoreError),
}

impl AnswerError {
    /// Returns `true` for caller mistakes (as opposed to upstream faults).
    pub fn is_client_error(&self) -> bool {
        matches!(self, AnswerError::InvalidInput)
    }
}
