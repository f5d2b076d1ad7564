//! Error taxonomy for the ask pipeline.
//!
//! Every failure a caller can observe is a variant of [`AskError`].
//! The local stages (chunking, vectorization, retrieval) are pure and do
//! not fail on textual input; errors originate at the two I/O boundaries
//! (extraction, model call) or at the validation and gate checks in the
//! orchestrator.

use thiserror::Error;

/// Failures surfaced by [`Session`](crate::session::Session) operations.
#[derive(Debug, Error)]
pub enum AskError {
    /// The document bytes could not be turned into text. Fatal to
    /// ingestion; no partial corpus is built.
    #[error("document extraction failed: {0}")]
    Extraction(String),

    /// The question was empty after trimming. Recoverable; the caller
    /// should re-prompt. Does not consume quota.
    #[error("question is empty")]
    EmptyQuestion,

    /// The document produced zero chunks, so there is no context to send
    /// to the model. Does not consume quota.
    #[error("document has no extractable text to answer from")]
    EmptyDocument,

    /// The session's request budget is exhausted. Recoverable only by
    /// starting a new session.
    #[error("request quota exhausted ({used}/{ceiling})")]
    QuotaExceeded { used: u32, ceiling: u32 },

    /// The chat model call failed. Propagated as-is; the orchestrator
    /// never retries or fabricates an answer.
    #[error("chat model call failed: {0}")]
    Model(anyhow::Error),
}
