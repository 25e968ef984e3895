use super::*;
use crate::candidate::{Bucket, Candidate};

fn faq(id: &str, similarity: f32, content: &str) -> Candidate {
    Candidate {
        document_id: id.to_string(),
        url: None,
        bucket: Bucket::Faq,
        chunk_index: 0,
        content: content.to_string(),
        similarity,
    }
}

fn review(id: &str, content: &str) -> Candidate {
    Candidate {
        document_id: id.to_string(),
        url: None,
        bucket: Bucket::Review,
        chunk_index: 0,
        content: content.to_string(),
        similarity: 0.0,
    }
}

fn unknown(id: &str) -> Candidate {
    Candidate {
        document_id: id.to_string(),
        url: None,
        bucket: Bucket::Unknown,
        chunk_index: 0,
        content: "mystery content".to_string(),
        similarity: 0.99,
    }
}

// --- FAQ primary path ---

#[test]
fn test_faq_threshold_boundary_inclusive() {
    let config = RankingConfig::default();
    let candidates = vec![faq("at", config.faq_min_similarity, "exactly at threshold")];

    let results = rank_faq(&candidates, "anything", &config);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].candidate.document_id, "at");
    assert!(!results[0].via_rescue);
}

#[test]
fn test_faq_below_threshold_excluded() {
    let config = RankingConfig::default();
    let candidates = vec![faq(
        "below",
        config.faq_min_similarity - 0.001,
        "just under",
    )];

    let results = rank_faq(&candidates, "unrelated query text", &config);
    assert!(results.is_empty());
}

#[test]
fn test_faq_sorted_descending_and_capped() {
    let config = RankingConfig::default();
    let candidates = vec![
        faq("c", 0.70, "third"),
        faq("a", 0.90, "first"),
        faq("d", 0.65, "fourth"),
        faq("b", 0.80, "second"),
    ];

    let results = rank_faq(&candidates, "anything", &config);

    assert_eq!(results.len(), config.max_faq_return);
    assert_eq!(results[0].candidate.document_id, "a");
    assert_eq!(results[1].candidate.document_id, "b");
    assert_eq!(results[2].candidate.document_id, "c");
}

#[test]
fn test_faq_equal_scores_keep_original_order() {
    let config = RankingConfig::default();
    let candidates = vec![
        faq("first-in", 0.8, "tied"),
        faq("second-in", 0.8, "also tied"),
    ];

    let results = rank_faq(&candidates, "anything", &config);

    assert_eq!(results[0].candidate.document_id, "first-in");
    assert_eq!(results[1].candidate.document_id, "second-in");
}

#[test]
fn test_faq_boost_is_additive() {
    let config = RankingConfig {
        faq_boost: 0.1,
        ..RankingConfig::default()
    };
    let candidates = vec![faq("doc", 0.7, "boosted")];

    let results = rank_faq(&candidates, "anything", &config);
    assert!((results[0].score - 0.8).abs() < 1e-6);
}

#[test]
fn test_faq_ignores_other_buckets() {
    let config = RankingConfig::default();
    let candidates = vec![
        review("rev", "a glowing review"),
        unknown("mys"),
        faq("doc", 0.9, "the answer"),
    ];

    let results = rank_faq(&candidates, "anything", &config);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].candidate.document_id, "doc");
}

#[test]
fn test_faq_empty_input() {
    let config = RankingConfig::default();
    assert!(rank_faq(&[], "anything", &config).is_empty());
}

// --- FAQ rescue fallback ---

#[test]
fn test_rescue_activation() {
    let config = RankingConfig::default();
    // Nothing clears the threshold, but the query carries order intent and
    // one candidate mentions order tracking.
    let candidates = vec![
        faq("other", 0.2, "Our store hours are 9 to 5."),
        faq("orders", 0.3, "Track your order on the orders page."),
    ];

    let results = rank_faq(&candidates, "where is my order", &config);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].candidate.document_id, "orders");
    assert!(results[0].via_rescue);
    assert!(results[0].score > 0.0);
}

#[test]
fn test_rescue_not_armed_without_intent_keyword() {
    let config = RankingConfig::default();
    let candidates = vec![faq("orders", 0.3, "Track your order on the orders page.")];

    let results = rank_faq(&candidates, "what colors do you stock", &config);
    assert!(results.is_empty());
}

#[test]
fn test_rescue_armed_but_no_positive_candidate() {
    let config = RankingConfig::default();
    let candidates = vec![faq("hours", 0.3, "Our store hours are 9 to 5.")];

    let results = rank_faq(&candidates, "where is my order", &config);
    assert!(results.is_empty());
}

#[test]
fn test_rescue_returns_single_best() {
    let config = RankingConfig::default();
    let candidates = vec![
        faq("weak", 0.1, "We process orders."),
        faq("strong", 0.1, "Track your order delivery status and shipping."),
    ];

    let results = rank_faq(&candidates, "track my delivery", &config);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].candidate.document_id, "strong");
}

#[test]
fn test_rescue_tie_keeps_original_order() {
    let config = RankingConfig::default();
    let candidates = vec![
        faq("first-in", 0.1, "order information"),
        faq("second-in", 0.1, "order details"),
    ];

    let results = rank_faq(&candidates, "my order", &config);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].candidate.document_id, "first-in");
}

#[test]
fn test_rescue_not_entered_when_primary_succeeds() {
    let config = RankingConfig::default();
    let candidates = vec![
        faq("primary", 0.9, "nothing keyword related"),
        faq("keyworded", 0.1, "order order order tracking delivery"),
    ];

    let results = rank_faq(&candidates, "where is my order", &config);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].candidate.document_id, "primary");
    assert!(!results[0].via_rescue);
}

// --- Review pipeline ---

#[test]
fn test_reviews_zero_lexical_score_discarded() {
    let config = RankingConfig::default();
    let candidates = vec![
        review("hit", "Review: the fit was perfect"),
        review("miss", "Review: parking was easy"),
    ];

    let results = rank_reviews(&candidates, "fit", &config);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].lexical_score, 1);
    assert_eq!(results[0].review.text, "the fit was perfect");
}

#[test]
fn test_reviews_higher_lexical_score_wins_regardless_of_position() {
    let config = RankingConfig::default();
    let candidates = vec![
        review("early", "Review: good fit"),
        review("late", "Review: great fit and fast delivery"),
    ];

    let results = rank_reviews(&candidates, "fit delivery", &config);

    assert_eq!(results.len(), 2);
    // "late" matches both tokens; the position bonus cannot overcome a
    // full point of lexical difference.
    assert_eq!(results[0].lexical_score, 2);
    assert_eq!(results[1].lexical_score, 1);
}

#[test]
fn test_reviews_position_bonus_breaks_ties() {
    let config = RankingConfig::default();
    let candidates = vec![
        review("first-in", "Review: lovely fit"),
        review("second-in", "Review: decent fit"),
    ];

    let results = rank_reviews(&candidates, "fit", &config);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].review.text, "lovely fit");
    assert!(results[0].score > results[1].score);
}

#[test]
fn test_reviews_capped() {
    let config = RankingConfig::default();
    let candidates: Vec<Candidate> = (0..10)
        .map(|i| review(&format!("r{i}"), "Review: perfect fit"))
        .collect();

    let results = rank_reviews(&candidates, "fit", &config);
    assert_eq!(results.len(), config.max_review_return);
}

#[test]
fn test_reviews_parse_fields_carried_through() {
    let config = RankingConfig::default();
    let mut candidate = review(
        "r1",
        "Reviewer: Jane Doe\nRating: 5\nDate: 2024-01-01\nReview: Great fit",
    );
    candidate.url = Some("https://g.co/kgs/abc".to_string());

    let results = rank_reviews(&[candidate], "fit", &config);

    assert_eq!(results.len(), 1);
    let parsed = &results[0].review;
    assert_eq!(parsed.reviewer.as_deref(), Some("Jane Doe"));
    assert_eq!(parsed.rating, Some(5.0));
    assert_eq!(parsed.date.as_deref(), Some("2024-01-01"));
    assert_eq!(parsed.source_url.as_deref(), Some("https://g.co/kgs/abc"));
}

#[test]
fn test_reviews_ignore_other_buckets() {
    let config = RankingConfig::default();
    let candidates = vec![faq("faq", 0.9, "fit guide"), review("rev", "Review: fit")];

    let results = rank_reviews(&candidates, "fit", &config);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].review.text, "fit");
}

#[test]
fn test_reviews_empty_input() {
    let config = RankingConfig::default();
    assert!(rank_reviews(&[], "fit", &config).is_empty());
}

// --- Determinism ---

#[test]
fn test_pipelines_are_deterministic() {
    let config = RankingConfig::default();
    let faqs = vec![
        faq("a", 0.8, "first answer"),
        faq("b", 0.8, "second answer"),
        faq("c", 0.7, "third answer"),
    ];
    let reviews = vec![
        review("x", "Review: good fit"),
        review("y", "Review: bad fit"),
    ];

    for _ in 0..5 {
        assert_eq!(
            rank_faq(&faqs, "question", &config),
            rank_faq(&faqs, "question", &config)
        );
        assert_eq!(
            rank_reviews(&reviews, "fit", &config),
            rank_reviews(&reviews, "fit", &config)
        );
    }
}
