//! Scalar vector math shared by the vectorizer and the ranker.

use crate::error::{Result, SearchError};

/// Dot product of two equal-length slices.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean (L2) norm.
pub fn norm(v: &[f64]) -> f64 {
    dot(v, v).sqrt()
}

/// Cosine similarity clamped to `[0.0, 1.0]`.
///
/// A zero-norm side yields `0.0`. Slices of different length are a caller bug
/// and fail instead of being truncated.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(SearchError::VectorLengthMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }

    // One sqrt over the product keeps identical vectors at exactly 1.0
    let denom = (dot(a, a) * dot(b, b)).sqrt();
    if denom == 0.0 {
        return Ok(0.0);
    }
    Ok((dot(a, b) / denom).clamp(0.0, 1.0))
}
