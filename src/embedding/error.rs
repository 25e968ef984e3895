use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by embedding generation.
pub enum EmbeddingError {
    /// The HTTP request to the embedding API failed.
    #[error("embedding request to '{url}' failed: {message}")]
    RequestFailed {
        /// Endpoint URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// The embedding API answered with a non-success status.
    #[error("embedding API returned status {status}: {message}")]
    BadStatus {
        /// HTTP status code.
        status: u16,
        /// Response body excerpt.
        message: String,
    },

    /// The response carried no embedding data.
    #[error("embedding API response contained no embeddings")]
    EmptyResponse,

    /// The returned vector has the wrong dimensionality.
    #[error("embedding dimension mismatch: {0}")]
    DimensionMismatch(#[from] crate::constants::DimValidationError),
}
