//! Chat model abstraction and providers.
//!
//! Defines the [`ChatModel`] trait the orchestrator talks to, and two
//! implementations:
//! - **[`DisabledModel`]** — always errors; used when no provider is
//!   configured, so the retrieval pipeline stays testable offline.
//! - **[`OpenAiCompatModel`]** — calls an OpenAI-compatible
//!   `/chat/completions` endpoint (Groq, OpenAI) with timeout, retry,
//!   and backoff.
//!
//! # Retry Strategy
//!
//! Transient failures are retried with exponential backoff inside the
//! provider; the orchestrator itself never retries:
//! - HTTP 429 (rate limited) and 5xx (server error) → retry
//! - HTTP 4xx (client error, not 429) → fail immediately
//! - Network errors → retry
//! - Backoff: 1s, 2s, 4s, 8s, 16s, 32s (capped at 2^5)

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ModelConfig;

/// One role-tagged message in a chat prompt.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A chat completion backend.
///
/// Takes an ordered sequence of role-tagged messages and returns a single
/// textual completion. Failures propagate to the caller; implementations
/// must not fabricate answers.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Returns the model identifier (e.g. `"llama-3.1-8b-instant"`).
    fn model_name(&self) -> &str;

    /// Request a completion for the given messages.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

// ============ Disabled Model ============

/// A no-op model that always returns errors.
///
/// Used when `model.provider = "disabled"` in the configuration.
pub struct DisabledModel;

#[async_trait]
impl ChatModel for DisabledModel {
    fn model_name(&self) -> &str {
        "disabled"
    }

    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
        bail!("Chat model provider is disabled")
    }
}

// ============ OpenAI-compatible Model ============

/// Chat provider for OpenAI-compatible `/chat/completions` endpoints.
///
/// Covers Groq (`https://api.groq.com/openai/v1`) and OpenAI
/// (`https://api.openai.com/v1`). The API key is read from the
/// environment variable named in the config.
pub struct OpenAiCompatModel {
    model: String,
    base_url: String,
    api_key_env: String,
    timeout_secs: u64,
    max_retries: u32,
}

impl OpenAiCompatModel {
    /// Create a provider from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `model.model` is not set or the API key
    /// environment variable is missing.
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let model = config
            .model
            .clone()
            .ok_or_else(|| anyhow::anyhow!("model.model required for provider '{}'", config.provider))?;

        let api_key_env = config.resolved_api_key_env();
        if std::env::var(&api_key_env).is_err() {
            bail!("{} environment variable not set", api_key_env);
        }

        Ok(Self {
            model,
            base_url: config.resolved_base_url(),
            api_key_env,
            timeout_secs: config.timeout_secs,
            max_retries: config.max_retries,
        })
    }
}

#[async_trait]
impl ChatModel for OpenAiCompatModel {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let api_key = std::env::var(&self.api_key_env)
            .map_err(|_| anyhow::anyhow!("{} not set", self.api_key_env))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()?;

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });

        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_secs(1 << (attempt - 1).min(5));
                debug!(attempt, ?delay, "retrying chat completion");
                tokio::time::sleep(delay).await;
            }

            let resp = client
                .post(&url)
                .header("Authorization", format!("Bearer {}", api_key))
                .header("Content-Type", "application/json")
                .json(&body)
                .send()
                .await;

            match resp {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let json: serde_json::Value = response.json().await?;
                        return parse_chat_response(&json);
                    }

                    // Rate limited or server error, retry
                    if status.as_u16() == 429 || status.is_server_error() {
                        let body_text = response.text().await.unwrap_or_default();
                        warn!(%status, "transient chat API error");
                        last_err = Some(anyhow::anyhow!("chat API error {}: {}", status, body_text));
                        continue;
                    }

                    // Client error (not 429), don't retry
                    let body_text = response.text().await.unwrap_or_default();
                    bail!("chat API error {}: {}", status, body_text);
                }
                Err(e) => {
                    last_err = Some(e.into());
                    continue;
                }
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("chat completion failed after retries")))
    }
}

/// Extract `choices[0].message.content` from a chat completions response.
fn parse_chat_response(json: &serde_json::Value) -> Result<String> {
    json.get("choices")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow::anyhow!("Invalid chat response: missing choices[0].message.content"))
}

/// Create the appropriate [`ChatModel`] based on configuration.
///
/// | Config Value | Provider |
/// |-------------|----------|
/// | `"disabled"` | [`DisabledModel`] |
/// | `"groq"`, `"openai"` | [`OpenAiCompatModel`] |
pub fn create_model(config: &ModelConfig) -> Result<Box<dyn ChatModel>> {
    match config.provider.as_str() {
        "disabled" => Ok(Box::new(DisabledModel)),
        "groq" | "openai" => Ok(Box::new(OpenAiCompatModel::new(config)?)),
        other => bail!("Unknown model provider: {}", other),
    }
}
