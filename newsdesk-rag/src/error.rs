//! Error types for the `newsdesk-rag` crate.

use thiserror::Error;

/// Errors that can occur while building or querying a corpus.
#[derive(Debug, Error)]
pub enum RagError {
    /// Chunking produced no chunks, so there is nothing to index.
    #[error("corpus contains no chunks")]
    EmptyCorpus,

    /// A search was attempted against an index with no rows. Reaching
    /// this through [`crate::CorpusHandle`] is impossible; it indicates
    /// an index used outside the build-then-search lifecycle.
    #[error("vector index holds no rows; build it before searching")]
    IndexNotReady,

    /// A vector's dimension does not match the index.
    #[error("vector dimension mismatch: index expects {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension the index was built with.
        expected: usize,
        /// Dimension of the offending vector.
        actual: usize,
    },

    /// The embedding provider failed.
    #[error("embedding error ({provider}): {message}")]
    Embedding {
        /// The provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
