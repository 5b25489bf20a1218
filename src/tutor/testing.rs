//! Shared [`ChatClient`] test doubles for the flow tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::{ChatClient, ChatMessage, LlmError};

/// Always succeeds with a fixed raw reply.
pub(crate) struct StaticClient {
    raw: String,
}

impl StaticClient {
    pub fn new(raw: &str) -> Self {
        Self { raw: raw.to_string() }
    }
}

#[async_trait]
impl ChatClient for StaticClient {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, LlmError> {
        Ok(self.raw.clone())
    }
}

/// Always returns the configured error.
pub(crate) struct FailingClient {
    kind: FailureKind,
}

pub(crate) enum FailureKind {
    Transport,
    Timeout,
    Status,
    Empty,
}

impl FailingClient {
    pub fn transport() -> Self {
        Self { kind: FailureKind::Transport }
    }

    pub fn timeout() -> Self {
        Self { kind: FailureKind::Timeout }
    }

    pub fn status() -> Self {
        Self { kind: FailureKind::Status }
    }

    pub fn empty() -> Self {
        Self { kind: FailureKind::Empty }
    }
}

#[async_trait]
impl ChatClient for FailingClient {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, LlmError> {
        Err(match self.kind {
            FailureKind::Transport => LlmError::Request("connection refused".into()),
            FailureKind::Timeout => LlmError::Timeout,
            FailureKind::Status => LlmError::Status(429),
            FailureKind::Empty => LlmError::EmptyResponse,
        })
    }
}

/// Records every invocation (count + last message list) before answering
/// with either a fixed reply or a transport error.
pub(crate) struct CountingClient {
    calls: AtomicUsize,
    last: Mutex<Vec<ChatMessage>>,
    reply: Option<String>,
}

impl CountingClient {
    /// A counting client that always succeeds with `raw`.
    pub fn ok(raw: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last: Mutex::new(Vec::new()),
            reply: Some(raw.to_string()),
        }
    }

    /// A counting client that always fails with a transport error.
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last: Mutex::new(Vec::new()),
            reply: None,
        }
    }

    /// How many times `complete` was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The message list of the most recent invocation.
    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for CountingClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = messages.to_vec();
        match &self.reply {
            Some(raw) => Ok(raw.clone()),
            None => Err(LlmError::Request("connection refused".into())),
        }
    }
}
