//! Error types for the `docqa-retrieval` crate.

use thiserror::Error;

/// Errors that can occur in retrieval operations.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The embedding provider is not configured or not reachable.
    ///
    /// Recovered locally by the pipeline via full-text fallback; never
    /// surfaced to the end user as a failure.
    #[error("Embedding service unavailable ({provider})")]
    ServiceUnavailable {
        /// The embedding provider that is unavailable.
        provider: String,
    },

    /// A specific embedding call errored at call time.
    ///
    /// Treated like [`ServiceUnavailable`](RetrievalError::ServiceUnavailable)
    /// by the pipeline (fall back), but distinguished in logs.
    #[error("Embedding failed ({provider}): {message}")]
    EmbeddingFailed {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A stored embedding's length differs from the query embedding's.
    ///
    /// This is an index invariant violation and a defect signal; it is fatal
    /// to the offending query and is never recovered by fallback.
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The query embedding's dimensionality.
        expected: usize,
        /// The offending stored embedding's dimensionality.
        actual: usize,
    },

    /// Neither vector results nor fallback text could be produced.
    #[error("Could not read document contents")]
    NoContentAvailable,

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An error in the index or a full-text source.
    #[error("Index error: {0}")]
    IndexError(String),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;
