//! Tutor engine for Sprachheld.
//!
//! This module provides:
//! * [`CefrLevel`] — learner proficiency tier, carried through every request.
//! * [`ConversationSession`] / [`Turn`] / [`Role`] — append-only session history.
//! * [`PromptBuilder`] — per-flow system instructions and role-mapped messages.
//! * [`ConversationFlow`] / [`TutorReply`] — progressive German conversation.
//! * [`FeedbackFlow`] / [`Feedback`] — text correction with follow-up question.
//! * [`CorrectionFlow`] / [`Correction`] — spoken-mistake explanations.
//! * [`MistakeDetector`] / [`CommonMistakeDetector`] — heuristic mistake trigger.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use sprachheld::config::AppConfig;
//! use sprachheld::llm::ApiClient;
//! use sprachheld::tutor::{CefrLevel, ConversationFlow, ConversationSession};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let flow = ConversationFlow::new(ApiClient::from_config(&config.llm));
//!     let mut session = ConversationSession::new();
//!
//!     let message = "Ich bin Hunger";
//!     if let Some(reply) = flow
//!         .reply(CefrLevel::A1, "Daily conversation", message, session.turns())
//!         .await
//!     {
//!         session.push_learner(message);
//!         session.push_tutor(reply.tutor_message.clone());
//!         println!("{}", reply.tutor_message);
//!     }
//! }
//! ```

pub mod conversation;
pub mod correction;
pub mod detect;
pub mod feedback;
pub mod level;
pub mod prompt;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use conversation::{ConversationFlow, TutorReply};
pub use correction::{Correction, CorrectionFlow, MistakeReport};
pub use detect::{CommonMistakeDetector, DetectedMistake, MistakeDetector};
pub use feedback::{Feedback, FeedbackFlow};
pub use level::{CefrLevel, ParseLevelError};
pub use prompt::PromptBuilder;
pub use session::{ConversationSession, Role, Turn};
