use crate::vectordb::{Pool, RetrievedRow, RowTags, VectorStore, VectorStoreError};
use std::collections::HashMap;

/// In-memory vector store for tests and local development.
///
/// Vectors are optional per passage: passages seeded without a vector are
/// invisible to [`VectorStore::nearest_neighbors`] but still returned by
/// [`VectorStore::scan_pool`], mirroring a review pool ingested without
/// embeddings.
#[derive(Default)]
pub struct MockVectorStore {
    pools: std::sync::RwLock<HashMap<Pool, Vec<MockPassage>>>,
}

/// Seedable passage record for [`MockVectorStore`].
#[derive(Debug, Clone)]
pub struct MockPassage {
    pub document_id: String,
    pub url: Option<String>,
    pub chunk_index: u32,
    pub content: String,
    pub vector: Option<Vec<f32>>,
    pub chunk_tags: RowTags,
    pub doc_tags: RowTags,
}

impl MockPassage {
    /// Creates a passage with content only (no vector, no tags).
    pub fn new(document_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            url: None,
            chunk_index: 0,
            content: content.into(),
            vector: None,
            chunk_tags: RowTags::default(),
            doc_tags: RowTags::default(),
        }
    }

    /// Attaches an embedding vector.
    pub fn with_vector(mut self, vector: Vec<f32>) -> Self {
        self.vector = Some(vector);
        self
    }

    /// Sets the source URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets chunk-level tags.
    pub fn with_chunk_tags(mut self, tags: RowTags) -> Self {
        self.chunk_tags = tags;
        self
    }

    /// Sets document-level tags.
    pub fn with_doc_tags(mut self, tags: RowTags) -> Self {
        self.doc_tags = tags;
        self
    }

    fn to_row(&self, distance: f32) -> RetrievedRow {
        RetrievedRow {
            document_id: self.document_id.clone(),
            url: self.url.clone(),
            chunk_index: self.chunk_index,
            content: self.content.clone(),
            distance,
            chunk_tags: self.chunk_tags.clone(),
            doc_tags: self.doc_tags.clone(),
        }
    }
}

impl MockVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a passage into `pool`. Insertion order is preserved and is the
    /// order `scan_pool` returns.
    pub fn seed(&self, pool: Pool, passage: MockPassage) {
        let mut pools = self.pools.write().unwrap_or_else(|e| e.into_inner());
        pools.entry(pool).or_default().push(passage);
    }

    /// Number of passages seeded into `pool`.
    pub fn passage_count(&self, pool: Pool) -> usize {
        self.pools
            .read()
            .map(|p| p.get(&pool).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

impl VectorStore for MockVectorStore {
    async fn nearest_neighbors(
        &self,
        vector: Vec<f32>,
        pool: Pool,
        k: usize,
    ) -> Result<Vec<RetrievedRow>, VectorStoreError> {
        let pools = self
            .pools
            .read()
            .map_err(|_| VectorStoreError::SearchFailed {
                collection: pool.tag().to_string(),
                message: "lock poisoned".to_string(),
            })?;

        let passages = pools.get(&pool).map(Vec::as_slice).unwrap_or_default();

        let mut rows: Vec<RetrievedRow> = passages
            .iter()
            .filter_map(|p| {
                let stored = p.vector.as_ref()?;
                let distance = 1.0 - cosine_similarity(&vector, stored);
                Some(p.to_row(distance))
            })
            .collect();

        // Stable sort keeps insertion order for equal distances, matching
        // the reproducibility guarantee of the real store.
        rows.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        rows.truncate(k);
        Ok(rows)
    }

    async fn scan_pool(
        &self,
        pool: Pool,
        limit: usize,
    ) -> Result<Vec<RetrievedRow>, VectorStoreError> {
        let pools = self.pools.read().map_err(|_| VectorStoreError::ScanFailed {
            collection: pool.tag().to_string(),
            message: "lock poisoned".to_string(),
        })?;

        let mut rows: Vec<RetrievedRow> = pools
            .get(&pool)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|p| p.to_row(1.0))
            .collect();

        rows.truncate(limit);
        Ok(rows)
    }
}

/// Cosine similarity of two vectors (0.0 when degenerate).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
