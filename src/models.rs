//! Core data types that flow through the ingestion and answer pipeline.

use crate::vectorize::Vocabulary;

/// A fixed-size slice of the extracted document text, in original order.
///
/// `index` is stable for the lifetime of the document and is the join key
/// between retrieval results and displayed context. Concatenating all
/// chunk texts in index order reproduces the extracted text exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub text: String,
}

/// One fully ingested document: chunks, frozen vocabulary, and one
/// unit-normalized term-frequency vector per chunk.
///
/// Immutable once built; a new upload replaces it wholesale. The
/// vocabulary is frozen here, so query vectors computed later share the
/// same axis and out-of-vocabulary query words contribute zero signal.
#[derive(Debug, Clone)]
pub struct IngestedDocument {
    /// SHA-256 of the extracted text, hex-encoded. Log identity only.
    pub text_hash: String,
    pub chunks: Vec<Chunk>,
    pub vocabulary: Vocabulary,
    pub vectors: Vec<Vec<f32>>,
}

impl IngestedDocument {
    /// Number of chunks in the corpus.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True when the document yielded no chunks (nothing can be asked).
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
