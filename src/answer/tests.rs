use super::*;
use crate::embedding::{EmbeddingError, EmbeddingProvider, MockEmbedder};
use crate::ranking::RankingConfig;
use crate::vectordb::{MockPassage, MockVectorStore, Pool, RowTags};

const DIM: usize = 4;

/// Embedder that answers every query with the same vector, so tests can
/// seed passages at exact similarities.
struct FixedEmbedder(Vec<f32>);

impl EmbeddingProvider for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.0.clone())
    }
}

fn query_vector() -> Vec<f32> {
    vec![1.0, 0.0, 0.0, 0.0]
}

fn near_vector() -> Vec<f32> {
    // Identical direction: similarity 1.0.
    query_vector()
}

fn far_vector() -> Vec<f32> {
    // Orthogonal: similarity 0.0.
    vec![0.0, 1.0, 0.0, 0.0]
}

fn engine_over(
    store: MockVectorStore,
    options: EngineOptions,
) -> AnswerEngine<FixedEmbedder, MockVectorStore> {
    AnswerEngine::new(
        FixedEmbedder(query_vector()),
        store,
        RankingConfig::default(),
        options,
    )
}

fn seed_qualifying_faq(store: &MockVectorStore) {
    store.seed(
        Pool::Faq,
        MockPassage::new("faq-1", "You can return items within 30 days.")
            .with_vector(near_vector()),
    );
}

fn seed_matching_review(store: &MockVectorStore) {
    store.seed(
        Pool::Review,
        MockPassage::new(
            "rev-1",
            "Reviewer: Jane Doe\nRating: 5\nDate: 2024-01-01\nReview: easy return process",
        )
        .with_vector(near_vector())
        .with_chunk_tags(RowTags::source("review")),
    );
}

#[tokio::test]
async fn test_empty_query_rejected_before_upstream() {
    let engine = AnswerEngine::new(
        MockEmbedder::failing(DIM),
        MockVectorStore::new(),
        RankingConfig::default(),
        EngineOptions::default(),
    );

    let err = engine
        .answer(AnswerRequest::new("   "))
        .await
        .expect_err("blank query must fail");

    assert!(matches!(err, AnswerError::InvalidInput));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_faq_hit() {
    let store = MockVectorStore::new();
    seed_qualifying_faq(&store);
    let engine = engine_over(store, EngineOptions::default());

    let response = engine
        .answer(AnswerRequest::new("what is the return policy"))
        .await
        .unwrap();

    assert_eq!(response.source, AnswerSource::Faq);
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.can_show_reviews, Some(true));
    assert!(response.message.is_none());

    match &response.results[0] {
        AnswerResult::Faq(faq) => {
            assert_eq!(faq.content, "You can return items within 30 days.");
            assert!(faq.similarity > 0.99);
        }
        AnswerResult::Review(_) => panic!("expected an FAQ result"),
    }
}

#[tokio::test]
async fn test_faq_wins_over_qualifying_reviews() {
    let store = MockVectorStore::new();
    seed_qualifying_faq(&store);
    seed_matching_review(&store);
    let engine = engine_over(store, EngineOptions::default());

    let response = engine
        .answer(AnswerRequest::new("easy return process"))
        .await
        .unwrap();

    // Strict priority: FAQ answers, reviews are only invited.
    assert_eq!(response.source, AnswerSource::Faq);
    assert_eq!(response.can_show_reviews, Some(true));
    assert!(
        response
            .results
            .iter()
            .all(|r| matches!(r, AnswerResult::Faq(_)))
    );
}

#[tokio::test]
async fn test_faq_miss_falls_through_to_reviews() {
    let store = MockVectorStore::new();
    store.seed(
        Pool::Faq,
        MockPassage::new("faq-far", "Unrelated store hours info.").with_vector(far_vector()),
    );
    seed_matching_review(&store);
    let engine = engine_over(store, EngineOptions::default());

    let response = engine
        .answer(AnswerRequest::new("easy return process"))
        .await
        .unwrap();

    assert_eq!(response.source, AnswerSource::GoogleReview);
    assert_eq!(response.results.len(), 1);
    assert!(response.can_show_reviews.is_none());

    match &response.results[0] {
        AnswerResult::Review(review) => {
            assert_eq!(review.reviewer.as_deref(), Some("Jane Doe"));
            assert_eq!(review.rating, Some(5.0));
            assert_eq!(review.date.as_deref(), Some("2024-01-01"));
            assert_eq!(review.text, "easy return process");
        }
        AnswerResult::Faq(_) => panic!("expected a review result"),
    }
}

#[tokio::test]
async fn test_both_pools_miss_yields_none_with_message() {
    let store = MockVectorStore::new();
    store.seed(
        Pool::Faq,
        MockPassage::new("faq-far", "Unrelated info.").with_vector(far_vector()),
    );
    let engine = engine_over(store, EngineOptions::default());

    let response = engine
        .answer(AnswerRequest::new("something nobody wrote about"))
        .await
        .unwrap();

    assert_eq!(response.source, AnswerSource::None);
    assert!(response.results.is_empty());
    assert_eq!(response.message.as_deref(), Some(NOT_FOUND_MESSAGE));
}

#[tokio::test]
async fn test_show_reviews_bypasses_faq() {
    let store = MockVectorStore::new();
    seed_qualifying_faq(&store);
    seed_matching_review(&store);
    let engine = engine_over(store, EngineOptions::default());

    let response = engine
        .answer(AnswerRequest::new("easy return process").reviews_only())
        .await
        .unwrap();

    assert_eq!(response.source, AnswerSource::GoogleReview);
    assert!(
        response
            .results
            .iter()
            .all(|r| matches!(r, AnswerResult::Review(_)))
    );
}

#[tokio::test]
async fn test_review_scan_mode_without_embeddings() {
    let store = MockVectorStore::new();
    // Review pool ingested without vectors: nearest-neighbor would find
    // nothing, the scan path still ranks lexically.
    store.seed(
        Pool::Review,
        MockPassage::new("rev-novec", "Review: quick delivery and friendly staff")
            .with_chunk_tags(RowTags::source("review")),
    );
    let engine = engine_over(
        store,
        EngineOptions {
            review_vector_search: false,
            ..EngineOptions::default()
        },
    );

    let response = engine
        .answer(AnswerRequest::new("delivery").reviews_only())
        .await
        .unwrap();

    assert_eq!(response.source, AnswerSource::GoogleReview);
    assert_eq!(response.results.len(), 1);
}

#[tokio::test]
async fn test_upstream_failure_absorbed_by_default() {
    let engine = AnswerEngine::new(
        MockEmbedder::failing(DIM),
        MockVectorStore::new(),
        RankingConfig::default(),
        EngineOptions::default(),
    );

    let response = engine
        .answer(AnswerRequest::new("anything"))
        .await
        .expect("fail-soft should absorb the failure");

    assert_eq!(response.source, AnswerSource::None);
    assert!(response.results.is_empty());
    assert_eq!(response.message.as_deref(), Some(UNAVAILABLE_MESSAGE));
}

#[tokio::test]
async fn test_upstream_failure_propagates_in_debug() {
    let engine = AnswerEngine::new(
        MockEmbedder::failing(DIM),
        MockVectorStore::new(),
        RankingConfig::default(),
        EngineOptions::default(),
    );

    let err = engine
        .answer(AnswerRequest::new("anything").with_debug())
        .await
        .expect_err("debug requests propagate upstream failures");

    assert!(matches!(err, AnswerError::Embedding(_)));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn test_upstream_failure_propagates_when_fail_soft_disabled() {
    let engine = AnswerEngine::new(
        MockEmbedder::failing(DIM),
        MockVectorStore::new(),
        RankingConfig::default(),
        EngineOptions {
            fail_soft: false,
            ..EngineOptions::default()
        },
    );

    let err = engine.answer(AnswerRequest::new("anything")).await;
    assert!(err.is_err());
}

#[tokio::test]
async fn test_debug_exposes_transitions_and_unknown_candidates() {
    let store = MockVectorStore::new();
    seed_qualifying_faq(&store);
    store.seed(
        Pool::Faq,
        MockPassage::new("odd", "mystery content")
            .with_vector(near_vector())
            .with_chunk_tags(RowTags::source("blog-post")),
    );
    let engine = engine_over(store, EngineOptions::default());

    let response = engine
        .answer(AnswerRequest::new("return policy").with_debug())
        .await
        .unwrap();

    let debug = response.debug.expect("debug info requested");
    assert_eq!(
        debug.transitions,
        vec!["START", "FAQ_SEARCH", "FAQ_HIT", "DONE"]
    );
    // Unknown-bucket candidates are visible in debug, absent from results.
    assert!(
        debug
            .faq_candidates
            .iter()
            .any(|c| c.document_id == "odd"
                && c.bucket == crate::candidate::Bucket::Unknown)
    );
    assert_eq!(response.results.len(), 1);
}

#[tokio::test]
async fn test_debug_absent_unless_requested() {
    let store = MockVectorStore::new();
    seed_qualifying_faq(&store);
    let engine = engine_over(store, EngineOptions::default());

    let response = engine
        .answer(AnswerRequest::new("return policy"))
        .await
        .unwrap();

    assert!(response.debug.is_none());
}

#[tokio::test]
async fn test_top_k_clamped_to_at_least_one() {
    let store = MockVectorStore::new();
    seed_qualifying_faq(&store);
    let engine = engine_over(store, EngineOptions::default());

    let mut request = AnswerRequest::new("return policy");
    request.top_k = Some(0);

    let response = engine.answer(request).await.unwrap();
    assert_eq!(response.source, AnswerSource::Faq);
    assert_eq!(response.results.len(), 1);
}

#[tokio::test]
async fn test_identical_queries_yield_identical_responses() {
    let store = MockVectorStore::new();
    seed_qualifying_faq(&store);
    seed_matching_review(&store);
    let engine = engine_over(store, EngineOptions::default());

    let first = engine
        .answer(AnswerRequest::new("easy return process"))
        .await
        .unwrap();
    let second = engine
        .answer(AnswerRequest::new("easy return process"))
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}
