//! Hashed bag-of-words vectorizer.
//!
//! Text → lowercase → whitespace tokens → one bucket per token.
//! Bucket index = first 8 bytes of SHA-256(token) as big-endian `u64`, mod
//! `dimensions`. The mapping never depends on process state, so the same text
//! gives the same vector in every run and every implementation.

use sha2::{Digest, Sha256};

use crate::error::{Result, SearchError};

/// Default number of buckets.
pub const DEFAULT_DIMENSIONS: usize = 128;

/// Fixed-length count vector produced by the [`Vectorizer`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextVector(Vec<f64>);

impl TextVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    /// True when every bucket is zero (no tokens were counted).
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }
}

impl AsRef<[f64]> for TextVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Vectorizer bound to one dimensionality, validated once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vectorizer {
    dimensions: usize,
}

impl Default for Vectorizer {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS,
        }
    }
}

impl Vectorizer {
    pub fn new(dimensions: usize) -> Result<Self> {
        if dimensions == 0 {
            return Err(SearchError::InvalidDimension(dimensions));
        }
        Ok(Self { dimensions })
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Convert text into a count vector of length `self.dimensions()`.
    pub fn vectorize(&self, text: &str) -> TextVector {
        let mut buckets = vec![0.0; self.dimensions];
        for token in text.to_lowercase().split_whitespace() {
            buckets[bucket_index(token, self.dimensions)] += 1.0;
        }
        TextVector(buckets)
    }
}

/// Convert `text` into a count vector with `dimensions` buckets.
pub fn vectorize(text: &str, dimensions: usize) -> Result<TextVector> {
    Ok(Vectorizer::new(dimensions)?.vectorize(text))
}

fn bucket_index(token: &str, dimensions: usize) -> usize {
    let digest = Sha256::digest(token.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(prefix) % dimensions as u64) as usize
}
