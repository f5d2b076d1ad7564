//! Ingest/answer orchestration.
//!
//! A [`Session`] owns the configuration and the request gate and composes
//! the pipeline stages into the two caller-facing operations:
//!
//! - [`Session::ingest`] — extract, chunk, build the vocabulary, and
//!   embed every chunk. Runs once per uploaded document; a new upload
//!   replaces the previous corpus wholesale.
//! - [`Session::answer`] — one request/response cycle: validate the
//!   question, consume the gate, embed the query, retrieve the top-K
//!   chunks, build the prompt, and call the chat model.
//!
//! The gate is the only mutable state; everything else is rebuilt per
//! ingest. One session serves one caller at a time; a concurrent server
//! holds one `Session` per client.

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::chunk::chunk_text;
use crate::config::Config;
use crate::error::AskError;
use crate::extract::extract_text;
use crate::gate::RequestGate;
use crate::model::{ChatMessage, ChatModel};
use crate::models::IngestedDocument;
use crate::retrieve::top_k;
use crate::vectorize::{build_vocabulary, embed};

/// Visible separator between retrieved chunks in the context string.
pub const CONTEXT_SEPARATOR: &str = "\n\n-----\n\n";

/// System instruction constraining the model to the supplied context.
pub const SYSTEM_PROMPT: &str = "Answer ONLY using the provided document context.";

/// One question-answering session over a single document.
pub struct Session {
    config: Config,
    gate: RequestGate,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let gate = RequestGate::new(config.quota.max_requests);
        Self { config, gate }
    }

    /// Ingest raw document bytes into a queryable corpus.
    ///
    /// Extracts text, chunks it at the configured size, builds the frozen
    /// vocabulary from the chunk set, and embeds every chunk against it.
    pub fn ingest(&self, bytes: &[u8]) -> Result<IngestedDocument, AskError> {
        let text = extract_text(bytes)?;
        let text_hash = format!("{:x}", Sha256::digest(text.as_bytes()));

        let chunks = chunk_text(&text, self.config.chunking.chunk_size);
        let vocabulary = build_vocabulary(&chunks);
        let vectors = chunks
            .iter()
            .map(|c| embed(&c.text, &vocabulary))
            .collect::<Vec<_>>();

        info!(
            hash = %&text_hash[..12],
            chunks = chunks.len(),
            vocabulary = vocabulary.len(),
            "ingested document"
        );

        Ok(IngestedDocument {
            text_hash,
            chunks,
            vocabulary,
            vectors,
        })
    }

    /// Answer one question about an ingested document.
    ///
    /// Check order matters: an empty question and an empty document are
    /// rejected before the gate, so neither consumes quota; once the gate
    /// accepts, the counter is incremented exactly once even if the model
    /// call later fails.
    pub async fn answer(
        &mut self,
        doc: &IngestedDocument,
        model: &dyn ChatModel,
        question: &str,
    ) -> Result<String, AskError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AskError::EmptyQuestion);
        }
        if doc.is_empty() {
            return Err(AskError::EmptyDocument);
        }

        self.gate.try_consume()?;

        let query_vec = embed(question, &doc.vocabulary);
        let top = top_k(&query_vec, &doc.vectors, self.config.retrieval.top_k);
        debug!(?top, "retrieved chunks");

        let context = build_context(doc, &top);
        let messages = build_prompt(&context, question);

        let answer = model
            .complete(&messages)
            .await
            .map_err(AskError::Model)?;

        info!(
            used = self.gate.used(),
            ceiling = self.gate.ceiling(),
            "answered question"
        );
        Ok(answer)
    }

    /// Round-trips still available in this session.
    pub fn remaining_quota(&self) -> u32 {
        self.gate.remaining()
    }

    /// Requests consumed so far.
    pub fn requests_used(&self) -> u32 {
        self.gate.used()
    }
}

/// Join the selected chunks' text, in ranked order, into one context
/// string with a visible separator.
pub fn build_context(doc: &IngestedDocument, ranked_indices: &[usize]) -> String {
    ranked_indices
        .iter()
        .filter_map(|&i| doc.chunks.get(i))
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

/// Build the two-message prompt: system constraint plus the context and
/// question in a single user message.
pub fn build_prompt(context: &str, question: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(format!("Context:\n{}\n\nQuestion: {}", context, question)),
    ]
}
