//! Candidate normalization and bucket classification.
//!
//! Turns raw retrieval rows into typed [`Candidate`]s with a closed
//! [`Bucket`] enum, replacing the historical practice of probing untyped
//! metadata fields at every call site.


use serde::Serialize;

use crate::vectordb::RetrievedRow;

/// Semantic pool a candidate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// FAQ / help-center content.
    Faq,
    /// Customer review content.
    Review,
    /// Tagged with something we do not recognize. Excluded from both
    /// ranking paths, visible only in debug output.
    Unknown,
}

/// A retrieved passage with its derived similarity, prior to ranking.
///
/// Created per query and discarded once the response is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// Source document identifier.
    pub document_id: String,
    /// Source URL, if known.
    pub url: Option<String>,
    /// Resolved bucket.
    pub bucket: Bucket,
    /// Chunk index within the source document.
    pub chunk_index: u32,
    /// Raw passage text.
    pub content: String,
    /// `1 − cosine distance`. Nominally in `[0, 1]` but not clamped;
    /// floating point may drift slightly past either end.
    pub similarity: f32,
}

/// Maps an explicit tag value onto a bucket.
///
/// Returns `None` for empty values so the priority chain moves on to the
/// next slot; any non-empty unrecognized value is `Unknown` (first
/// non-empty wins, even when we cannot use it).
fn bucket_from_tag(value: &str) -> Option<Bucket> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    match value.to_ascii_lowercase().as_str() {
        "faq" => Some(Bucket::Faq),
        "review" | "reviews" | "google-review" => Some(Bucket::Review),
        _ => Some(Bucket::Unknown),
    }
}

/// Resolves the bucket for a row.
///
/// Priority chain, first non-empty value wins: chunk source tag → chunk
/// type tag → doc source tag → doc type tag → URL marker heuristic →
/// default `Faq`. The FAQ default is deliberate: rows with no bucket
/// metadata at all have historically always been FAQ content, and
/// classifying them `Unknown` would silently drop legitimate matches.
pub fn resolve_bucket(row: &RetrievedRow, review_url_markers: &[String]) -> Bucket {
    let tag_slots = [
        row.chunk_tags.source.as_deref(),
        row.chunk_tags.kind.as_deref(),
        row.doc_tags.source.as_deref(),
        row.doc_tags.kind.as_deref(),
    ];

    for slot in tag_slots.into_iter().flatten() {
        if let Some(bucket) = bucket_from_tag(slot) {
            return bucket;
        }
    }

    if let Some(url) = row.url.as_deref() {
        let url = url.to_ascii_lowercase();
        if review_url_markers
            .iter()
            .any(|marker| !marker.is_empty() && url.contains(&marker.to_ascii_lowercase()))
        {
            return Bucket::Review;
        }
    }

    Bucket::Faq
}

/// Normalizes a raw retrieval row into a typed [`Candidate`].
///
/// Pure and total: malformed rows never panic, they classify as best the
/// chain allows.
pub fn normalize(row: &RetrievedRow, review_url_markers: &[String]) -> Candidate {
    Candidate {
        document_id: row.document_id.clone(),
        url: row.url.clone(),
        bucket: resolve_bucket(row, review_url_markers),
        chunk_index: row.chunk_index,
        content: row.content.clone(),
        similarity: 1.0 - row.distance,
    }
}

/// Normalizes a batch of rows, preserving the store's order.
pub fn normalize_all(rows: &[RetrievedRow], review_url_markers: &[String]) -> Vec<Candidate> {
    rows.iter()
        .map(|row| normalize(row, review_url_markers))
        .collect()
}
