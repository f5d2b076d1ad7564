//! Vocabulary construction and term-frequency embedding.
//!
//! The vectorizer is a deliberately lightweight stand-in for a learned
//! embedding model: every text is represented as a count of vocabulary
//! term occurrences, L2-normalized to unit length. Tokens are obtained by
//! lowercasing and splitting on whitespace; punctuation stays attached to
//! its word ("mammals." is one token).
//!
//! The [`Vocabulary`] is built once from a document's chunk set and is
//! frozen thereafter: query vectors are computed against the same axis,
//! so a query word the document never uses contributes zero signal. That
//! is an accepted approximation, not a bug.

use std::collections::HashMap;

use crate::models::Chunk;

/// The frozen set of distinct lowercase tokens for one document.
///
/// Term order is first occurrence across the chunk sequence, which makes
/// vocabulary construction deterministic and keeps every subsequent
/// [`embed`] call aligned on the same axis.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// All terms, in their fixed axis order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Axis position of a (lowercase) token, if it is in the vocabulary.
    pub fn position(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }
}

/// Lowercase and whitespace-split `text` into owned tokens.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|t| t.to_string())
        .collect()
}

/// Build the frozen vocabulary from a document's chunk set.
///
/// Takes the set of unique tokens across the whole chunk sequence, in
/// first-occurrence order. Deterministic for a given chunk sequence.
pub fn build_vocabulary(chunks: &[Chunk]) -> Vocabulary {
    let mut vocab = Vocabulary::default();
    for chunk in chunks {
        for token in tokenize(&chunk.text) {
            if !vocab.index.contains_key(&token) {
                vocab.index.insert(token.clone(), vocab.terms.len());
                vocab.terms.push(token);
            }
        }
    }
    vocab
}

/// Embed `text` as a unit-normalized term-count vector over `vocab`.
///
/// Counts each vocabulary term's occurrences in the token sequence
/// (out-of-vocabulary tokens are silently dropped), then divides by the
/// Euclidean norm. A text containing no vocabulary token embeds to the
/// all-zero vector, returned unchanged. Word order does not matter, only
/// counts, so embedding is idempotent.
pub fn embed(text: &str, vocab: &Vocabulary) -> Vec<f32> {
    let mut vec = vec![0.0f32; vocab.len()];
    for token in tokenize(text) {
        if let Some(pos) = vocab.position(&token) {
            vec[pos] += 1.0;
        }
    }

    let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut vec {
            *x /= norm;
        }
    }
    vec
}
