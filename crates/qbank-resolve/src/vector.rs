//! Sparse token-count vectors and cosine similarity.

use std::collections::HashMap;

use crate::tokenize::tokenize;

/// Bag-of-words vector: token counts plus their Euclidean norm.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    pub counts: HashMap<String, u32>,
    /// Never below 1, so an empty vector scores 0 instead of NaN.
    pub norm: f64,
}

impl SparseVector {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Count the tokens of `text`.
pub fn vectorize(text: &str) -> SparseVector {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    let sum_sq: f64 = counts.values().map(|&c| f64::from(c) * f64::from(c)).sum();
    let norm = if sum_sq > 0.0 { sum_sq.sqrt() } else { 1.0 };
    SparseVector { counts, norm }
}

/// Dot product over shared tokens divided by the product of both norms.
pub fn cosine_similarity(query: &SparseVector, target: &SparseVector) -> f64 {
    // iterate the smaller map
    let (small, large) = if query.counts.len() <= target.counts.len() {
        (&query.counts, &target.counts)
    } else {
        (&target.counts, &query.counts)
    };
    let dot: f64 = small
        .iter()
        .filter_map(|(token, &a)| large.get(token).map(|&b| f64::from(a) * f64::from(b)))
        .sum();

    let denom = query.norm * target.norm;
    if denom == 0.0 {
        return 0.0;
    }
    dot / denom
}
