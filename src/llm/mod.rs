//! Completion-client module for Sprachheld.
//!
//! This module provides:
//! * [`ChatClient`] — async trait implemented by all completion backends.
//! * [`ApiClient`] — OpenAI-compatible REST API client (Groq by default).
//! * [`ChatMessage`] — one role-tagged message of an outbound request.
//! * [`LlmError`] — error variants for completion operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use sprachheld::config::AppConfig;
//! use sprachheld::llm::{ApiClient, ChatClient, ChatMessage};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let client = ApiClient::from_config(&config.llm);
//!
//!     let messages = [
//!         ChatMessage::system("You are a German language tutor. Respond in JSON."),
//!         ChatMessage::user("Wie sagt man 'hello'?"),
//!     ];
//!
//!     match client.complete(&messages).await {
//!         Ok(raw) => println!("{raw}"),
//!         Err(e) => eprintln!("completion failed: {e}"),
//!     }
//! }
//! ```

pub mod client;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{ApiClient, ChatClient, ChatMessage, LlmError};
