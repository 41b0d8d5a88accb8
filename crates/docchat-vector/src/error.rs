//! Error types for docchat-vector.

use thiserror::Error;

/// Result type for docchat-vector operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in docchat-vector operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Chunk and embedding slices passed to `build` differ in length.
    #[error("Chunk/embedding count mismatch: {chunks} chunks, {embeddings} embeddings")]
    LengthMismatch {
        /// Number of chunks provided.
        chunks: usize,
        /// Number of embeddings provided.
        embeddings: usize,
    },

    /// Dimension mismatch between a vector and the index.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions.
        expected: usize,
        /// Actual dimensions provided.
        actual: usize,
    },

    /// Invalid vector (e.g., empty, contains NaN).
    #[error("Invalid vector: {0}")]
    InvalidVector(String),
}
