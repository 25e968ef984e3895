use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{RetrievedPoint, ScoredPoint, Value};
use std::collections::HashMap;

/// Knowledge pool a passage is stored under.
///
/// Pools are disjoint: a passage is either FAQ content or review content,
/// and queries filter on exactly one pool at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pool {
    /// Curated FAQ / help-center passages.
    Faq,
    /// Customer review passages.
    Review,
}

impl Pool {
    /// Payload tag value used to filter points by pool.
    pub fn tag(self) -> &'static str {
        match self {
            Pool::Faq => "faq",
            Pool::Review => "review",
        }
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Bucket tags carried on a row at chunk or document level.
///
/// Both fields are optional; the candidate normalizer probes them in a
/// fixed priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowTags {
    /// `source` tag value, if present.
    pub source: Option<String>,
    /// `type` tag value, if present.
    pub kind: Option<String>,
}

impl RowTags {
    /// Creates tags with only a `source` value.
    pub fn source(value: impl Into<String>) -> Self {
        Self {
            source: Some(value.into()),
            kind: None,
        }
    }

    /// Creates tags with only a `type` value.
    pub fn kind(value: impl Into<String>) -> Self {
        Self {
            source: None,
            kind: Some(value.into()),
        }
    }
}

/// Raw retrieval row as returned by the vector store.
///
/// `distance` is the cosine distance of the stored vector from the query
/// vector; rows coming from a metadata-filtered scan carry `distance = 1.0`
/// (similarity zero) since no query vector was involved.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedRow {
    /// Source document identifier.
    pub document_id: String,
    /// Source URL, if known.
    pub url: Option<String>,
    /// Chunk index within the source document.
    pub chunk_index: u32,
    /// Raw passage text.
    pub content: String,
    /// Cosine distance from the query vector.
    pub distance: f32,
    /// Chunk-level bucket tags.
    pub chunk_tags: RowTags,
    /// Document-level bucket tags.
    pub doc_tags: RowTags,
}

fn payload_str(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
    payload.get(key).and_then(|v| match &v.kind {
        Some(Kind::StringValue(s)) => Some(s.clone()),
        _ => None,
    })
}

fn payload_u32(payload: &HashMap<String, Value>, key: &str) -> u32 {
    payload
        .get(key)
        .and_then(|v| match &v.kind {
            Some(Kind::IntegerValue(i)) => u32::try_from(*i).ok(),
            _ => None,
        })
        .unwrap_or(0)
}

fn tags_from_payload(payload: &HashMap<String, Value>, prefix: &str) -> RowTags {
    RowTags {
        source: payload_str(payload, &format!("{prefix}_source")),
        kind: payload_str(payload, &format!("{prefix}_type")),
    }
}

fn row_from_payload(payload: &HashMap<String, Value>, distance: f32) -> Option<RetrievedRow> {
    let content = payload_str(payload, "content")?;

    Some(RetrievedRow {
        document_id: payload_str(payload, "document_id").unwrap_or_default(),
        url: payload_str(payload, "url"),
        chunk_index: payload_u32(payload, "chunk_index"),
        content,
        distance,
        chunk_tags: tags_from_payload(payload, "chunk"),
        doc_tags: tags_from_payload(payload, "doc"),
    })
}

impl RetrievedRow {
    /// Builds a row from a scored search point. Qdrant reports cosine
    /// similarity, so the stored distance is `1 − score`.
    ///
    /// Returns `None` when the point has no `content` payload (nothing to
    /// rank or display).
    pub fn from_scored_point(point: &ScoredPoint) -> Option<Self> {
        row_from_payload(&point.payload, 1.0 - point.score)
    }

    /// Builds a row from a scroll point (no query vector, distance `1.0`).
    pub fn from_retrieved_point(point: &RetrievedPoint) -> Option<Self> {
        row_from_payload(&point.payload, 1.0)
    }
}
