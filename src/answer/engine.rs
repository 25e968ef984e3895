use tracing::{debug, info, warn};

use crate::candidate::{self, Candidate};
use crate::constants::{DEFAULT_TOP_K, MAX_TOP_K, REVIEW_SCAN_LIMIT};
use crate::embedding::EmbeddingProvider;
use crate::ranking::{self, RankingConfig};
use crate::vectordb::{Pool, VectorStore};

use super::types::{
    AnswerError, AnswerRequest, AnswerResponse, AnswerResult, AnswerSource, AnswerState,
    DebugInfo, FaqOutcome, FaqResult, ReviewOutcome, ReviewResult,
};

/// User-facing message when neither pool qualifies.
pub const NOT_FOUND_MESSAGE: &str =
    "Sorry, we couldn't find an answer to that. Try rephrasing your question.";

/// User-facing message when an upstream dependency was unavailable and the
/// failure was absorbed.
pub const UNAVAILABLE_MESSAGE: &str =
    "Answer search is temporarily unavailable. Please try again in a moment.";

/// Behavior switches that are about the engine rather than ranking.
#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    /// Whether the review pool has embeddings. When `false`, review
    /// retrieval is a metadata-filtered scan ranked purely lexically.
    pub review_vector_search: bool,
    /// Whether upstream failures degrade to a soft `source=none` answer.
    /// Debug requests always propagate regardless.
    pub fail_soft: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            review_vector_search: true,
            fail_soft: true,
        }
    }
}

/// FAQ-first answer selection over the two knowledge pools.
///
/// Owns no retry or timeout policy: the embedding provider and vector store
/// are one-shot calls whose cancellation is the caller's concern. Holds
/// only read-only state, so one engine serves concurrent queries without
/// locking.
pub struct AnswerEngine<E, V> {
    embedder: E,
    store: V,
    ranking: RankingConfig,
    options: EngineOptions,
}

struct Trace {
    enabled: bool,
    transitions: Vec<String>,
}

impl Trace {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            transitions: Vec::new(),
        }
    }

    fn enter(&mut self, state: AnswerState) {
        debug!(state = state.label(), "answer state");
        if self.enabled {
            self.transitions.push(state.label().to_string());
        }
    }
}

impl<E, V> AnswerEngine<E, V>
where
    E: EmbeddingProvider,
    V: VectorStore,
{
    /// Creates an engine over the given collaborators and tunables.
    pub fn new(embedder: E, store: V, ranking: RankingConfig, options: EngineOptions) -> Self {
        Self {
            embedder,
            store,
            ranking,
            options,
        }
    }

    /// Returns the ranking tunables in use.
    pub fn ranking_config(&self) -> &RankingConfig {
        &self.ranking
    }

    /// Answers a customer question.
    ///
    /// `InvalidInput` is returned before any upstream call. Upstream
    /// failures propagate for debug requests (and when `fail_soft` is off);
    /// otherwise they degrade to an explicit `source=none` response —
    /// never a silent wrong answer.
    pub async fn answer(&self, request: AnswerRequest) -> Result<AnswerResponse, AnswerError> {
        let query = request.query.trim().to_string();
        if query.is_empty() {
            return Err(AnswerError::InvalidInput);
        }

        let top_k = request.top_k.unwrap_or(DEFAULT_TOP_K).clamp(1, MAX_TOP_K);
        let mut trace = Trace::new(request.debug);
        let mut debug_info = DebugInfo::default();

        trace.enter(AnswerState::Start);

        if request.show_reviews {
            trace.enter(AnswerState::ReviewsOnly);
            return self
                .review_phase(&query, top_k, request.debug, trace, debug_info)
                .await;
        }

        trace.enter(AnswerState::FaqSearch);

        let faq_candidates = match self.fetch_faq_candidates(&query, top_k).await {
            Ok(candidates) => candidates,
            Err(e) => return self.absorb_or_propagate(e, request.debug, trace, debug_info),
        };

        if trace.enabled {
            debug_info.faq_candidates = faq_candidates.clone();
        }

        let outcome = match ranking::rank_faq(&faq_candidates, &query, &self.ranking) {
            ranked if ranked.is_empty() => FaqOutcome::Miss,
            ranked => FaqOutcome::Hit(ranked),
        };

        match outcome {
            FaqOutcome::Hit(ranked) => {
                trace.enter(AnswerState::FaqHit);
                trace.enter(AnswerState::Done);
                info!(results = ranked.len(), "answering from FAQ pool");

                let results = ranked
                    .into_iter()
                    .map(|s| {
                        AnswerResult::Faq(FaqResult {
                            content: s.candidate.content,
                            similarity: s.candidate.similarity,
                        })
                    })
                    .collect();

                Ok(AnswerResponse {
                    source: AnswerSource::Faq,
                    results,
                    can_show_reviews: Some(true),
                    message: None,
                    debug: trace.enabled.then(|| {
                        debug_info.transitions = trace.transitions.clone();
                        debug_info
                    }),
                })
            }
            FaqOutcome::Miss => {
                trace.enter(AnswerState::FaqMiss);
                self.review_phase(&query, top_k, request.debug, trace, debug_info)
                    .await
            }
        }
    }

    async fn review_phase(
        &self,
        query: &str,
        top_k: usize,
        debug_mode: bool,
        mut trace: Trace,
        mut debug_info: DebugInfo,
    ) -> Result<AnswerResponse, AnswerError> {
        trace.enter(AnswerState::ReviewSearch);

        let review_candidates = match self.fetch_review_candidates(query, top_k).await {
            Ok(candidates) => candidates,
            Err(e) => return self.absorb_or_propagate(e, debug_mode, trace, debug_info),
        };

        if trace.enabled {
            debug_info.review_candidates = review_candidates.clone();
        }

        let outcome = match ranking::rank_reviews(&review_candidates, query, &self.ranking) {
            ranked if ranked.is_empty() => ReviewOutcome::Miss,
            ranked => ReviewOutcome::Hit(ranked),
        };

        match outcome {
            ReviewOutcome::Hit(ranked) => {
                trace.enter(AnswerState::ReviewHit);
                trace.enter(AnswerState::Done);
                info!(results = ranked.len(), "answering from review pool");

                let results = ranked
                    .into_iter()
                    .map(|s| {
                        AnswerResult::Review(ReviewResult {
                            reviewer: s.review.reviewer,
                            rating: s.review.rating,
                            date: s.review.date,
                            text: s.review.text,
                        })
                    })
                    .collect();

                Ok(AnswerResponse {
                    source: AnswerSource::GoogleReview,
                    results,
                    can_show_reviews: None,
                    message: None,
                    debug: trace.enabled.then(|| {
                        debug_info.transitions = trace.transitions.clone();
                        debug_info
                    }),
                })
            }
            ReviewOutcome::Miss => {
                trace.enter(AnswerState::ReviewMiss);
                trace.enter(AnswerState::Done);
                info!("no pool qualified, answering source=none");

                Ok(AnswerResponse {
                    source: AnswerSource::None,
                    results: Vec::new(),
                    can_show_reviews: None,
                    message: Some(NOT_FOUND_MESSAGE.to_string()),
                    debug: trace.enabled.then(|| {
                        debug_info.transitions = trace.transitions.clone();
                        debug_info
                    }),
                })
            }
        }
    }

    async fn fetch_faq_candidates(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<Candidate>, AnswerError> {
        let vector = self.embedder.embed(query).await?;
        let rows = self.store.nearest_neighbors(vector, Pool::Faq, top_k).await?;
        Ok(candidate::normalize_all(
            &rows,
            &self.ranking.review_url_markers,
        ))
    }

    async fn fetch_review_candidates(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<Candidate>, AnswerError> {
        let rows = if self.options.review_vector_search {
            let vector = self.embedder.embed(query).await?;
            self.store
                .nearest_neighbors(vector, Pool::Review, top_k)
                .await?
        } else {
            self.store.scan_pool(Pool::Review, REVIEW_SCAN_LIMIT).await?
        };

        Ok(candidate::normalize_all(
            &rows,
            &self.ranking.review_url_markers,
        ))
    }

    fn absorb_or_propagate(
        &self,
        error: AnswerError,
        debug_mode: bool,
        mut trace: Trace,
        mut debug_info: DebugInfo,
    ) -> Result<AnswerResponse, AnswerError> {
        if debug_mode || !self.options.fail_soft {
            return Err(error);
        }

        warn!(error = %error, "upstream unavailable, degrading to source=none");
        trace.enter(AnswerState::Done);

        Ok(AnswerResponse {
            source: AnswerSource::None,
            results: Vec::new(),
            can_show_reviews: None,
            message: Some(UNAVAILABLE_MESSAGE.to_string()),
            debug: trace.enabled.then(|| {
                debug_info.transitions = trace.transitions.clone();
                debug_info
            }),
        })
    }
}
