//! Vector store integration (Qdrant) and the retrieval row model.

pub mod client;
pub mod error;
pub mod mock;
pub mod model;


pub use client::{QdrantStore, VectorStore};
pub use error::VectorStoreError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockPassage, MockVectorStore, cosine_similarity};
pub use model::{Pool, RetrievedRow, RowTags};

/// Collection all pools are stored in, separated by a `pool` payload tag.
pub const DEFAULT_COLLECTION_NAME: &str = "askpool_passages";
