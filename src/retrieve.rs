//! Top-K chunk retrieval by vector similarity.
//!
//! Scores every corpus vector against the query by dot product. Both
//! sides are unit-normalized by the vectorizer, so the dot product is
//! cosine similarity; the zero vector scores 0 against everything.
//!
//! Ties (including the degenerate all-zero-query case) are broken by
//! original chunk order, which keeps retrieval deterministic and
//! testable.

use std::cmp::Ordering;

/// Dot product of two equal-length vectors; 0.0 on length mismatch.
fn dot(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Return the indices of the `k` highest-scoring corpus vectors,
/// ranked by descending score, ties broken by ascending index.
///
/// Returns fewer than `k` indices when the corpus is smaller than `k`,
/// and an empty sequence for an empty corpus.
pub fn top_k(query: &[f32], corpus: &[Vec<f32>], k: usize) -> Vec<usize> {
    let mut scored: Vec<(usize, f32)> = corpus
        .iter()
        .enumerate()
        .map(|(i, v)| (i, dot(query, v)))
        .collect();

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    scored.truncate(k);

    scored.into_iter().map(|(i, _)| i).collect()
}
