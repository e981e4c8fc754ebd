//! Search error types.

/// Input-validation errors raised by the vectorizer and ranker.
///
/// An empty query or an empty candidate set is not an error: both produce an
/// empty result list.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("Invalid dimension: {0} (must be > 0)")]
    InvalidDimension(usize),

    #[error("Vector length mismatch: expected {expected}, found {found}")]
    VectorLengthMismatch { expected: usize, found: usize },

    #[error("Invalid top_n: {0} (must be >= 1)")]
    InvalidTopN(usize),

    #[error("Invalid min_similarity: {0} (must be within [0.0, 1.0])")]
    InvalidThreshold(f64),
}

pub type Result<T> = std::result::Result<T, SearchError>;
