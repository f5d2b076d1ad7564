//! End-to-end pipeline tests driven through the library API, with a
//! recording chat model standing in for the live provider.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use askdoc::config::Config;
use askdoc::error::AskError;
use askdoc::model::{ChatMessage, ChatModel};
use askdoc::session::{Session, CONTEXT_SEPARATOR, SYSTEM_PROMPT};

/// Records every prompt it receives and returns a canned answer.
struct RecordingModel {
    calls: Mutex<Vec<Vec<ChatMessage>>>,
    reply: String,
}

impl RecordingModel {
    fn new(reply: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: reply.to_string(),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn last_prompt(&self) -> Vec<ChatMessage> {
        self.calls.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl ChatModel for RecordingModel {
    fn model_name(&self) -> &str {
        "recording"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.calls.lock().unwrap().push(messages.to_vec());
        Ok(self.reply.clone())
    }
}

/// Always fails, as a live provider might.
struct FailingModel;

#[async_trait]
impl ChatModel for FailingModel {
    fn model_name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
        anyhow::bail!("simulated provider outage")
    }
}

fn config_with_quota(max_requests: u32) -> Config {
    let mut config = Config::default();
    config.quota.max_requests = max_requests;
    config
}

#[tokio::test]
async fn single_chunk_document_sends_full_chunk_as_context() {
    let text = "Cats are mammals. Dogs are mammals too.";
    let mut session = Session::new(Config::default());
    let doc = session.ingest(text.as_bytes()).unwrap();

    // One chunk at the default 1000-char size, five distinct tokens.
    assert_eq!(doc.len(), 1);
    assert_eq!(
        doc.vocabulary.terms(),
        ["cats", "are", "mammals.", "dogs", "too."]
    );

    let model = RecordingModel::new("Cats are mammals.");
    let answer = session
        .answer(&doc, &model, "What are cats?")
        .await
        .unwrap();

    assert_eq!(answer, "Cats are mammals.");
    assert_eq!(model.call_count(), 1);

    let prompt = model.last_prompt();
    assert_eq!(prompt.len(), 2);
    assert_eq!(prompt[0].role, "system");
    assert_eq!(prompt[0].content, SYSTEM_PROMPT);
    assert_eq!(prompt[1].role, "user");
    assert_eq!(
        prompt[1].content,
        format!("Context:\n{}\n\nQuestion: What are cats?", text)
    );
}

#[tokio::test]
async fn empty_question_rejected_without_consuming_quota() {
    let mut session = Session::new(Config::default());
    let doc = session.ingest(b"Some document text.").unwrap();
    let model = RecordingModel::new("unused");

    for question in ["", "   ", "\n\t"] {
        let err = session.answer(&doc, &model, question).await.unwrap_err();
        assert!(matches!(err, AskError::EmptyQuestion));
    }

    assert_eq!(session.requests_used(), 0);
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn empty_document_short_circuits_before_model_call() {
    let mut session = Session::new(Config::default());
    let doc = session.ingest(b"").unwrap();
    assert!(doc.is_empty());

    let model = RecordingModel::new("unused");
    let err = session
        .answer(&doc, &model, "Anything in here?")
        .await
        .unwrap_err();

    assert!(matches!(err, AskError::EmptyDocument));
    assert_eq!(model.call_count(), 0);
    assert_eq!(session.requests_used(), 0);
}

#[tokio::test]
async fn quota_exhausts_after_ceiling_and_stops_counting() {
    let mut session = Session::new(config_with_quota(100));
    let doc = session.ingest(b"The answer to everything is 42.").unwrap();
    let model = RecordingModel::new("42");

    for _ in 0..100 {
        session
            .answer(&doc, &model, "What is the answer?")
            .await
            .unwrap();
    }
    assert_eq!(session.requests_used(), 100);
    assert_eq!(session.remaining_quota(), 0);

    // The 101st (and every later) attempt is rejected without a model
    // call and without incrementing the counter.
    for _ in 0..3 {
        let err = session
            .answer(&doc, &model, "What is the answer?")
            .await
            .unwrap_err();
        assert!(matches!(err, AskError::QuotaExceeded { used: 100, ceiling: 100 }));
    }
    assert_eq!(session.requests_used(), 100);
    assert_eq!(model.call_count(), 100);
}

#[tokio::test]
async fn model_failure_propagates_after_consuming_quota() {
    let mut session = Session::new(config_with_quota(10));
    let doc = session.ingest(b"Document body.").unwrap();

    let err = session
        .answer(&doc, &FailingModel, "Will this work?")
        .await
        .unwrap_err();

    assert!(matches!(err, AskError::Model(_)));
    // The round-trip was accepted by the gate before the model failed.
    assert_eq!(session.requests_used(), 1);
}

#[tokio::test]
async fn multi_chunk_retrieval_ranks_relevant_chunk_first() {
    // Force many small chunks so retrieval has something to rank.
    let mut config = Config::default();
    config.chunking.chunk_size = 40;
    config.retrieval.top_k = 2;

    let text = "The capital of France is Paris city. \
                Elephants are the largest land animals. \
                Paris hosts the Louvre museum in France.";
    let mut session = Session::new(config);
    let doc = session.ingest(text.as_bytes()).unwrap();
    assert!(doc.len() > 2);

    let model = RecordingModel::new("Paris");
    session
        .answer(&doc, &model, "What is the capital of France?")
        .await
        .unwrap();

    let prompt = model.last_prompt();
    let user = &prompt[1].content;
    // Context carries at most top_k chunks, joined by the separator.
    let context = user
        .strip_prefix("Context:\n")
        .and_then(|rest| rest.split("\n\nQuestion:").next())
        .unwrap();
    let parts: Vec<&str> = context.split(CONTEXT_SEPARATOR).collect();
    assert_eq!(parts.len(), 2);
    // The best-ranked chunk mentions France.
    assert!(parts[0].to_lowercase().contains("france"));
}

#[tokio::test]
async fn answering_is_deterministic_for_identical_questions() {
    let mut session = Session::new(Config::default());
    let doc = session.ingest(b"alpha beta gamma delta").unwrap();
    let model = RecordingModel::new("ok");

    session.answer(&doc, &model, "alpha?").await.unwrap();
    session.answer(&doc, &model, "alpha?").await.unwrap();

    let calls = model.calls.lock().unwrap();
    assert_eq!(calls[0], calls[1]);
}

#[test]
fn ingest_rejects_unextractable_bytes() {
    let session = Session::new(Config::default());
    let err = session.ingest(&[0xFF, 0xD8, 0xFF, 0x00]).unwrap_err();
    assert!(matches!(err, AskError::Extraction(_)));
}
