//! Ranking & boost engine.
//!
//! Two independent pipelines share one shape: candidates in, scored and
//! capped winners out. Both are pure and deterministic — no wall clock, no
//! randomness — so an identical query over an unchanged candidate set and
//! config always produces the identical result order. Ties break by the
//! vector store's original ordering (stable sorts only); that is a
//! requirement, not an accident.

pub mod config;

#[cfg(test)]
mod tests;

pub use config::{
    DEFAULT_FAQ_MIN_SIMILARITY, DEFAULT_MAX_FAQ_RETURN, DEFAULT_MAX_REVIEW_RETURN,
    DEFAULT_POSITION_BONUS_WEIGHT, DEFAULT_RESCUE_KEYWORDS, DEFAULT_REVIEW_URL_MARKERS,
    RankingConfig,
};

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::candidate::{Bucket, Candidate};
use crate::lexical;
use crate::review::{self, ParsedReview};

/// FAQ candidate with its final ranking score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredFaq {
    /// The underlying candidate.
    pub candidate: Candidate,
    /// Boosted similarity, or rescue keyword hit count.
    pub score: f32,
    /// Whether this result came from the rescue fallback.
    pub via_rescue: bool,
}

/// Review candidate with its parsed fields and lexical total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredReview {
    /// Structured review fields.
    pub review: ParsedReview,
    /// Raw lexical overlap count.
    pub lexical_score: usize,
    /// Lexical count plus position bonus plus bucket boost.
    pub score: f32,
}

fn sort_desc_by_score<T>(items: &mut [T], score: impl Fn(&T) -> f32) {
    // Stable: equal scores keep the store's original relative order.
    items.sort_by(|a, b| {
        score(b)
            .partial_cmp(&score(a))
            .unwrap_or(Ordering::Equal)
    });
}

/// Ranks faq-bucket candidates for a query.
///
/// Primary path: similarity threshold (inclusive), additive boost, stable
/// descending sort, cap. When the primary path yields nothing and the query
/// carries a rescue keyword, all faq candidates are re-scored by rescue
/// keyword hit count and the single best positive scorer is returned.
pub fn rank_faq(candidates: &[Candidate], query: &str, config: &RankingConfig) -> Vec<ScoredFaq> {
    let faq_candidates: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| c.bucket == Bucket::Faq)
        .collect();

    if faq_candidates.is_empty() {
        return Vec::new();
    }

    let mut primary: Vec<ScoredFaq> = faq_candidates
        .iter()
        .filter(|c| c.similarity >= config.faq_min_similarity)
        .map(|c| ScoredFaq {
            candidate: (*c).clone(),
            score: c.similarity + config.faq_boost,
            via_rescue: false,
        })
        .collect();

    if !primary.is_empty() {
        sort_desc_by_score(&mut primary, |s| s.score);
        primary.truncate(config.max_faq_return);

        debug!(
            results = primary.len(),
            threshold = config.faq_min_similarity,
            "FAQ primary path produced results"
        );
        return primary;
    }

    rescue_faq(&faq_candidates, query, config)
}

/// Keyword rescue: best-effort FAQ match when nothing clears the threshold.
fn rescue_faq(
    faq_candidates: &[&Candidate],
    query: &str,
    config: &RankingConfig,
) -> Vec<ScoredFaq> {
    let normalized_query = lexical::normalize_text(query);

    let armed = config.rescue_keywords.iter().any(|keyword| {
        let keyword = lexical::normalize_text(keyword);
        !keyword.is_empty() && normalized_query.contains(&keyword)
    });

    if !armed {
        debug!("rescue not armed: query carries no intent keyword");
        return Vec::new();
    }

    let mut best: Option<(usize, &Candidate)> = None;

    for candidate in faq_candidates {
        let content = lexical::normalize_text(&candidate.content);
        let hits = config
            .rescue_keywords
            .iter()
            .filter(|keyword| {
                let keyword = lexical::normalize_text(keyword);
                !keyword.is_empty() && content.contains(&keyword)
            })
            .count();

        // Strict > keeps the earliest candidate on ties (original order).
        if hits > 0 && best.is_none_or(|(best_hits, _)| hits > best_hits) {
            best = Some((hits, candidate));
        }
    }

    match best {
        Some((hits, candidate)) => {
            debug!(
                document_id = %candidate.document_id,
                hits, "rescue selected a fallback FAQ candidate"
            );
            vec![ScoredFaq {
                candidate: candidate.clone(),
                score: hits as f32,
                via_rescue: true,
            }]
        }
        None => {
            debug!("rescue armed but no candidate scored positively");
            Vec::new()
        }
    }
}

/// Ranks review-bucket candidates for a query.
///
/// Works identically for vector-ordered candidate lists and metadata-only
/// full scans: scoring is purely lexical, with a small position bonus that
/// decays over the incoming order and only ever breaks ties between equal
/// lexical scores.
pub fn rank_reviews(
    candidates: &[Candidate],
    query: &str,
    config: &RankingConfig,
) -> Vec<ScoredReview> {
    // Bonus magnitudes must stay below 1.0; lexical scores are integers, so
    // any fraction can reorder ties only.
    let bonus_weight = config.position_bonus_weight.clamp(0.0, 0.99);

    let mut scored: Vec<ScoredReview> = candidates
        .iter()
        .filter(|c| c.bucket == Bucket::Review)
        .enumerate()
        .filter_map(|(position, candidate)| {
            let parsed = review::parse(&candidate.content).with_source_url(candidate.url.clone());
            let lexical_score = lexical::score(&parsed.text, query);

            if lexical_score == 0 {
                return None;
            }

            let position_bonus = bonus_weight / (position + 1) as f32;

            Some(ScoredReview {
                review: parsed,
                lexical_score,
                score: lexical_score as f32 + position_bonus + config.review_boost,
            })
        })
        .collect();

    sort_desc_by_score(&mut scored, |s| s.score);
    scored.truncate(config.max_review_return);

    debug!(results = scored.len(), "review pipeline produced results");
    scored
}
