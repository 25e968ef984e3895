use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    Condition, CreateCollectionBuilder, Distance, Filter, ScrollPointsBuilder,
    SearchPointsBuilder, VectorParamsBuilder,
};

use super::error::VectorStoreError;
use super::model::{Pool, RetrievedRow};

#[derive(Clone)]
/// Qdrant-backed vector store.
pub struct QdrantStore {
    client: Qdrant,
    url: String,
    collection: String,
    vector_size: u64,
}

impl QdrantStore {
    /// Creates a store for `url` over `collection`.
    pub async fn new(
        url: &str,
        collection: &str,
        vector_size: u64,
    ) -> Result<Self, VectorStoreError> {
        let client =
            Qdrant::from_url(url)
                .build()
                .map_err(|e| VectorStoreError::ConnectionFailed {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

        Ok(Self {
            client,
            url: url.to_string(),
            collection: collection.to_string(),
            vector_size,
        })
    }

    /// Returns the configured URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the configured collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Performs a basic health check request.
    pub async fn health_check(&self) -> Result<(), VectorStoreError> {
        self.client
            .health_check()
            .await
            .map_err(|e| VectorStoreError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Ensures the collection exists (creates it with cosine distance if
    /// missing).
    pub async fn ensure_collection(&self) -> Result<(), VectorStoreError> {
        let exists = self
            .client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| VectorStoreError::CreateCollectionFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        if !exists {
            let vectors_config = VectorParamsBuilder::new(self.vector_size, Distance::Cosine);

            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection)
                        .vectors_config(vectors_config)
                        .on_disk_payload(true),
                )
                .await
                .map_err(|e| VectorStoreError::CreateCollectionFailed {
                    collection: self.collection.clone(),
                    message: e.to_string(),
                })?;
        }

        Ok(())
    }

    fn pool_filter(pool: Pool) -> Filter {
        Filter::must([Condition::matches("pool", pool.tag().to_string())])
    }
}

/// Minimal async interface the answer engine depends on.
///
/// `scan_pool` is the non-vector operating mode: review pools may be
/// ingested without embeddings, in which case the engine ranks a
/// metadata-filtered scan purely lexically.
pub trait VectorStore: Send + Sync {
    /// Returns the `k` nearest stored passages in `pool`.
    fn nearest_neighbors(
        &self,
        vector: Vec<f32>,
        pool: Pool,
        k: usize,
    ) -> impl std::future::Future<Output = Result<Vec<RetrievedRow>, VectorStoreError>> + Send;

    /// Returns up to `limit` passages in `pool` without a vector query.
    fn scan_pool(
        &self,
        pool: Pool,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<RetrievedRow>, VectorStoreError>> + Send;
}

impl VectorStore for QdrantStore {
    async fn nearest_neighbors(
        &self,
        vector: Vec<f32>,
        pool: Pool,
        k: usize,
    ) -> Result<Vec<RetrievedRow>, VectorStoreError> {
        if vector.len() as u64 != self.vector_size {
            return Err(VectorStoreError::InvalidDimension {
                expected: self.vector_size as usize,
                actual: vector.len(),
            });
        }

        let search_builder = SearchPointsBuilder::new(&self.collection, vector, k as u64)
            .filter(Self::pool_filter(pool))
            .with_payload(true);

        let search_result = self
            .client
            .search_points(search_builder)
            .await
            .map_err(|e| VectorStoreError::SearchFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        let rows = search_result
            .result
            .iter()
            .filter_map(RetrievedRow::from_scored_point)
            .collect();

        Ok(rows)
    }

    async fn scan_pool(
        &self,
        pool: Pool,
        limit: usize,
    ) -> Result<Vec<RetrievedRow>, VectorStoreError> {
        let scroll_builder = ScrollPointsBuilder::new(&self.collection)
            .filter(Self::pool_filter(pool))
            .limit(limit as u32)
            .with_payload(true);

        let scroll_result = self
            .client
            .scroll(scroll_builder)
            .await
            .map_err(|e| VectorStoreError::ScanFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        let rows = scroll_result
            .result
            .iter()
            .filter_map(RetrievedRow::from_retrieved_point)
            .collect();

        Ok(rows)
    }
}
