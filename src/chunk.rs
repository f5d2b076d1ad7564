//! Fixed-size text chunker.
//!
//! Splits extracted document text into consecutive, non-overlapping
//! [`Chunk`]s of at most `size` characters, in original order. The final
//! chunk may be shorter. Boundaries always fall on UTF-8 char boundaries,
//! and sizes are measured in chars, not bytes.
//!
//! # Guarantees
//!
//! - Concatenating all chunk texts in index order reproduces the input
//!   exactly: no overlap, no gaps, no reordering.
//! - Chunk count is `ceil(char_count / size)`.
//! - Empty text yields an empty chunk sequence; downstream stages must
//!   tolerate zero chunks.
//! - Deterministic and pure.

use crate::models::Chunk;

/// Split `text` into chunks of at most `size` chars each.
///
/// `size` is clamped to at least 1 so the function is total.
pub fn chunk_text(text: &str, size: usize) -> Vec<Chunk> {
    let size = size.max(1);
    if text.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut start = 0usize;
    let mut chars_in_chunk = 0usize;

    for (byte_idx, _) in text.char_indices() {
        if chars_in_chunk == size {
            chunks.push(Chunk {
                index: chunks.len(),
                text: text[start..byte_idx].to_string(),
            });
            start = byte_idx;
            chars_in_chunk = 0;
        }
        chars_in_chunk += 1;
    }

    chunks.push(Chunk {
        index: chunks.len(),
        text: text[start..].to_string(),
    });

    chunks
}
