use super::{EmbeddingError, EmbeddingProvider};

/// Deterministic embedder for tests and local development.
///
/// Vectors are derived from the text bytes, so identical inputs always
/// embed identically. Can be flipped into a failing mode to exercise the
/// fail-soft path.
#[derive(Debug, Clone)]
pub struct MockEmbedder {
    embedding_dim: usize,
    fail: bool,
}

impl MockEmbedder {
    /// Creates a mock producing vectors of `embedding_dim` floats.
    pub fn new(embedding_dim: usize) -> Self {
        Self {
            embedding_dim,
            fail: false,
        }
    }

    /// Returns a mock whose `embed` always fails.
    pub fn failing(embedding_dim: usize) -> Self {
        Self {
            embedding_dim,
            fail: true,
        }
    }

    /// Deterministic vector for `text` (also usable for seeding stores).
    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        let bytes = text.as_bytes();
        (0..self.embedding_dim)
            .map(|i| {
                let mut acc: u32 = i as u32 + 1;
                for (j, b) in bytes.iter().enumerate() {
                    acc = acc
                        .wrapping_mul(31)
                        .wrapping_add(u32::from(*b))
                        .wrapping_add(j as u32);
                }
                (acc % 1000) as f32 / 1000.0
            })
            .collect()
    }
}

impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if self.fail {
            return Err(EmbeddingError::RequestFailed {
                url: "mock://embedder".to_string(),
                message: "mock embedder configured to fail".to_string(),
            });
        }

        Ok(self.vector_for(text))
    }
}
