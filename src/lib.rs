//! Sprachheld — practice German with an AI tutor.
//!
//! The engine behind a language-learning chat app: it turns UI state
//! (CEFR level, conversation history, the latest learner input) into
//! requests against an external chat-completion endpoint and interprets the
//! model's structured JSON replies, degrading to fixed fallbacks whenever
//! the call or its parsing fails.
//!
//! # Modules
//!
//! * [`config`] — settings, defaults, and TOML persistence.
//! * [`llm`] — the [`ChatClient`](llm::ChatClient) seam and the
//!   OpenAI-compatible [`ApiClient`](llm::ApiClient) (Groq by default).
//! * [`tutor`] — session history, prompt assembly, and the three flows:
//!   progressive conversation, text feedback, and spoken-error correction,
//!   plus the pluggable mistake detector.
//! * [`voice`] — the voice-mode state machine (speech capture/synthesis
//!   themselves are external capabilities).
//!
//! # One conversational turn
//!
//! ```rust,no_run
//! use sprachheld::config::AppConfig;
//! use sprachheld::llm::ApiClient;
//! use sprachheld::tutor::{CefrLevel, ConversationFlow, ConversationSession};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::load().unwrap_or_default();
//!     let flow = ConversationFlow::new(ApiClient::from_config(&config.llm));
//!     let mut session = ConversationSession::new();
//!
//!     if let Some(reply) = flow
//!         .reply(CefrLevel::A1, "Daily conversation", "Ich bin Hunger", session.turns())
//!         .await
//!     {
//!         session.push_learner("Ich bin Hunger");
//!         session.push_tutor(reply.tutor_message.clone());
//!         println!("Tutor: {}", reply.tutor_message);
//!     }
//! }
//! ```

pub mod config;
pub mod llm;
pub mod tutor;
pub mod voice;
