//! Answer selection: the FAQ-first, review-fallback decision policy.
//!
//! `START → FAQ_SEARCH → (FAQ_HIT | FAQ_MISS)`, with a miss falling through
//! to `REVIEW_SEARCH → (REVIEW_HIT | REVIEW_MISS)`. Callers that already
//! saw an FAQ answer can re-enter at `REVIEWS_ONLY` via `showReviews`.
//! FAQ content strictly outranks review content when both would qualify.

pub mod engine;
pub mod types;

#[cfg(test)]
mod tests;

pub use engine::{AnswerEngine, EngineOptions, NOT_FOUND_MESSAGE, UNAVAILABLE_MESSAGE};
pub use types::{
    AnswerError, AnswerRequest, AnswerResponse, AnswerResult, AnswerSource, AnswerState,
    DebugInfo, FaqOutcome, FaqResult, ReviewOutcome, ReviewResult,
};
