//! # FaqDesk Search
//!
//! Similarity search over FAQ entries without a model or a vocabulary table.
//!
//! ## Design
//! - **Feature hashing**: every lowercase token lands in one of `dimensions`
//!   buckets (SHA-256 prefix mod `dimensions`), counts add up
//! - **Cosine similarity**: query vs candidate, clamped to `[0, 1]`
//! - **Threshold + top-N**: drop weak matches, keep the best `top_n`
//! - Pure functions only: no I/O, no shared state, safe to call concurrently
//!
//! Two different words may share a bucket. That loss is accepted in exchange
//! for a fixed-size vector.
//!
//! ## How it works
//! ```text
//! "Alpha setup query"
//!   ↓ Vectorizer (128 buckets)
//! [0, 1, 0, 0, 1, ..., 1]
//!   ↓ cosine vs every candidate (question + answer)
//! [(alpha, 0.58), (bravo, 0.0), (charlie, 0.0)]
//!   ↓ filter >= min_similarity, stable sort desc, take top_n
//! [alpha, bravo, charlie]
//! ```

pub mod error;
pub mod ranker;
pub mod vector;
pub mod vectorizer;

pub use error::{Result, SearchError};
pub use ranker::{Candidate, Ranker, RankerConfig, ScoredCandidate, rank_vectors};
pub use vector::{cosine_similarity, dot, norm};
pub use vectorizer::{DEFAULT_DIMENSIONS, TextVector, Vectorizer, vectorize};
