//! Similarity ranker — score, filter, sort, truncate.

use crate::error::{Result, SearchError};
use crate::vector::cosine_similarity;
use crate::vectorizer::{DEFAULT_DIMENSIONS, TextVector, Vectorizer};

/// A stored record (opaque to the ranker) plus the text its vector comes from.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<R> {
    pub reference: R,
    pub text: String,
}

impl<R> Candidate<R> {
    pub fn new(reference: R, text: impl Into<String>) -> Self {
        Self {
            reference,
            text: text.into(),
        }
    }
}

/// A candidate reference with its similarity to the query, in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<R> {
    pub reference: R,
    pub score: f64,
}

/// Ranker settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankerConfig {
    pub dimensions: usize,
    pub top_n: usize,
    pub min_similarity: f64,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS,
            top_n: 5,
            min_similarity: 0.0,
        }
    }
}

/// Text-level ranker: vectorizes the query and every candidate itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranker {
    vectorizer: Vectorizer,
    top_n: usize,
    min_similarity: f64,
}

impl Default for Ranker {
    fn default() -> Self {
        let config = RankerConfig::default();
        Self {
            vectorizer: Vectorizer::default(),
            top_n: config.top_n,
            min_similarity: config.min_similarity,
        }
    }
}

impl Ranker {
    pub fn new(config: RankerConfig) -> Result<Self> {
        validate_limits(config.top_n, config.min_similarity)?;
        Ok(Self {
            vectorizer: Vectorizer::new(config.dimensions)?,
            top_n: config.top_n,
            min_similarity: config.min_similarity,
        })
    }

    /// Same vectorizer, different limits (e.g. per-request overrides).
    pub fn with_limits(&self, top_n: usize, min_similarity: f64) -> Result<Self> {
        validate_limits(top_n, min_similarity)?;
        Ok(Self {
            vectorizer: self.vectorizer,
            top_n,
            min_similarity,
        })
    }

    pub fn vectorizer(&self) -> &Vectorizer {
        &self.vectorizer
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn min_similarity(&self) -> f64 {
        self.min_similarity
    }

    /// Ranked references, best first, at most `top_n`.
    pub fn rank<R, I>(&self, query: &str, candidates: I) -> Result<Vec<R>>
    where
        I: IntoIterator<Item = Candidate<R>>,
    {
        Ok(self
            .rank_scored(query, candidates)?
            .into_iter()
            .map(|s| s.reference)
            .collect())
    }

    /// Like [`Ranker::rank`] but keeps the scores.
    pub fn rank_scored<R, I>(&self, query: &str, candidates: I) -> Result<Vec<ScoredCandidate<R>>>
    where
        I: IntoIterator<Item = Candidate<R>>,
    {
        let query_vec = self.vectorizer.vectorize(query);
        if query_vec.is_zero() {
            return Ok(Vec::new());
        }

        let vectors = candidates.into_iter().map(|c| {
            let v = self.vectorizer.vectorize(&c.text);
            (c.reference, v)
        });
        rank_vectors(&query_vec, vectors, self.top_n, self.min_similarity)
    }
}

/// Vector-level ranking.
///
/// Returns an empty list for an all-zero query or no candidates. Candidates
/// with equal scores keep their input order.
pub fn rank_vectors<R, I>(
    query: &TextVector,
    candidates: I,
    top_n: usize,
    min_similarity: f64,
) -> Result<Vec<ScoredCandidate<R>>>
where
    I: IntoIterator<Item = (R, TextVector)>,
{
    validate_limits(top_n, min_similarity)?;
    if query.is_zero() {
        return Ok(Vec::new());
    }

    let mut scored = Vec::new();
    for (reference, vector) in candidates {
        let score = cosine_similarity(query.as_slice(), vector.as_slice())?;
        if score >= min_similarity {
            scored.push(ScoredCandidate { reference, score });
        }
    }

    // sort_by is stable: ties stay in candidate order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_n);
    Ok(scored)
}

fn validate_limits(top_n: usize, min_similarity: f64) -> Result<()> {
    if top_n == 0 {
        return Err(SearchError::InvalidTopN(top_n));
    }
    if !(0.0..=1.0).contains(&min_similarity) {
        return Err(SearchError::InvalidThreshold(min_similarity));
    }
    Ok(())
}
