//! Core `ChatClient` trait and `ApiClient` implementation.
//!
//! `ApiClient` calls any OpenAI-compatible `/v1/chat/completions` endpoint —
//! Groq (the default), OpenAI, Together.ai, LM Studio, vLLM, etc.  All
//! connection details come from [`LlmConfig`]; nothing is hardcoded.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::LlmConfig;

// ---------------------------------------------------------------------------
// ChatMessage
// ---------------------------------------------------------------------------

/// One message in an outbound completion request.
///
/// `role` carries the wire-level name (`"system"`, `"user"`, `"assistant"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant",
            content: content.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// LlmError
// ---------------------------------------------------------------------------

/// Errors that can occur while fetching a completion.
///
/// The variants exist for logging; the tutor flows treat every one of them
/// as the same "completion failed" condition and substitute their fixed
/// fallback value.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("completion request timed out")]
    Timeout,

    /// The endpoint answered with a non-success status code.
    #[error("completion endpoint returned status {0}")]
    Status(u16),

    /// The HTTP response could not be parsed as a completion envelope.
    #[error("failed to parse completion response: {0}")]
    Parse(String),

    /// The completion contained no usable text content.
    #[error("completion returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// ChatClient trait
// ---------------------------------------------------------------------------

/// Async trait for chat-completion backends.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks
/// (e.g. wrapped in `Arc<dyn ChatClient>`).  One invocation performs exactly
/// one attempt — no retries, no caching.
///
/// # Arguments
/// * `messages` – Ordered message list, system instruction first, assembled
///   by [`PromptBuilder`](crate::tutor::PromptBuilder).
///
/// Returns the first choice's raw text content, expected to be a JSON object
/// (every prompt in this engine requests strict JSON output).
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Calls an OpenAI-compatible `/v1/chat/completions` endpoint.
///
/// Defaults target Groq (`https://api.groq.com/openai`), but any provider
/// that speaks the OpenAI chat-completions wire format works.  All
/// connection details (`base_url`, `api_key`, `model`, `temperature`,
/// `timeout_secs`) come exclusively from the [`LlmConfig`] passed to
/// [`ApiClient::from_config`].
pub struct ApiClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl ApiClient {
    /// Build an `ApiClient` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.  A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(config: &LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl ChatClient for ApiClient {
    /// Send `messages` to the configured endpoint and return the reply text.
    ///
    /// The request always carries `response_format: {"type": "json_object"}`
    /// so the model is held to the strict-JSON output contract stated in the
    /// system instruction.  The `Authorization: Bearer …` header is attached
    /// **only** when the resolved API key is non-empty.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.config.base_url);

        let body = serde_json::json!({
            "model":           self.config.model,
            "messages":        messages,
            "stream":          false,
            "temperature":     self.config.temperature,
            "response_format": { "type": "json_object" }
        });

        let mut req = self.client.post(&url).json(&body);

        let key = self.config.resolve_api_key().unwrap_or_default();
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Status(status.as_u16()));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(LlmError::EmptyResponse)?
            .trim()
            .to_string();

        if content.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        Ok(content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
