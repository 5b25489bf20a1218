//! Progressive conversational flow (voice and text sessions).
//!
//! One learner message in, one [`TutorReply`] out.  The model decides per
//! turn whether a new grammatical concept should be introduced; that signal
//! is threaded back out verbatim as [`TutorReply::introduce_new_concept`] —
//! the engine never re-derives it and nothing here feeds it back into later
//! prompts, so callers may layer their own policy on top.
//!
//! Any transport or parse failure is absorbed here and replaced by a fixed
//! German apology; a failed turn leaves the session recoverable and awaiting
//! the next learner input.

use serde::Deserialize;

use crate::llm::ChatClient;
use crate::tutor::level::CefrLevel;
use crate::tutor::prompt::PromptBuilder;
use crate::tutor::session::Turn;

// ---------------------------------------------------------------------------
// TutorReply
// ---------------------------------------------------------------------------

/// Fixed tutor message substituted when the completion call or its parsing
/// fails.
pub const FALLBACK_TUTOR_MESSAGE: &str =
    "Entschuldigung, ich habe ein technisches Problem. Können wir das in einer \
     Minute noch einmal versuchen?";

/// English translation of [`FALLBACK_TUTOR_MESSAGE`].
pub const FALLBACK_TUTOR_TRANSLATION: &str =
    "Sorry, I'm having a technical problem. Can we try again in a minute?";

/// One tutor turn of the progressive conversation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorReply {
    /// The tutor's message, in German.
    pub tutor_message: String,

    /// Model-decided signal: introduce a new concept vs. reinforce a prior
    /// one.  Opaque to the engine; display-only.
    #[serde(rename = "shouldIntroduceNewConcept")]
    pub introduce_new_concept: bool,

    /// Optional English translation of the tutor message.  The model does
    /// not normally send one; the fallback always does.
    #[serde(default)]
    pub english_translation: Option<String>,
}

impl TutorReply {
    /// The fixed fallback reply (apology, flag `false`).
    pub fn fallback() -> Self {
        Self {
            tutor_message: FALLBACK_TUTOR_MESSAGE.to_string(),
            introduce_new_concept: false,
            english_translation: Some(FALLBACK_TUTOR_TRANSLATION.to_string()),
        }
    }
}

/// Strict-parse a raw model reply into a [`TutorReply`].
///
/// Returns `None` on invalid JSON or any missing required key; callers
/// substitute the fallback wholesale rather than repairing partial output.
pub fn parse_reply(raw: &str) -> Option<TutorReply> {
    serde_json::from_str(raw).ok()
}

// ---------------------------------------------------------------------------
// ConversationFlow
// ---------------------------------------------------------------------------

/// Drives one conversational turn: prompt → completion → parse → reply.
///
/// # Example
/// ```rust,no_run
/// use sprachheld::config::AppConfig;
/// use sprachheld::llm::ApiClient;
/// use sprachheld::tutor::{CefrLevel, ConversationFlow};
///
/// #[tokio::main]
/// async fn main() {
///     let config = AppConfig::default();
///     let flow = ConversationFlow::new(ApiClient::from_config(&config.llm));
///
///     let reply = flow
///         .reply(CefrLevel::A1, "Daily conversation", "Ich bin Hunger", &[])
///         .await
///         .expect("non-empty input always yields a reply");
///     println!("{}", reply.tutor_message);
/// }
/// ```
pub struct ConversationFlow<C: ChatClient> {
    client: C,
}

impl<C: ChatClient> ConversationFlow<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Return a reference to the wrapped client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Produce the tutor's reply to `user_message`.
    ///
    /// Returns `None` — without issuing any request — when `user_message` is
    /// empty after trimming.  Otherwise this never fails: transport and
    /// parse errors yield [`TutorReply::fallback`].
    pub async fn reply(
        &self,
        level: CefrLevel,
        topic: &str,
        user_message: &str,
        history: &[Turn],
    ) -> Option<TutorReply> {
        let trimmed = user_message.trim();
        if trimmed.is_empty() {
            return None;
        }

        let messages = PromptBuilder::new(level).conversation(topic, trimmed, history);

        let reply = match self.client.complete(&messages).await {
            Ok(raw) => parse_reply(&raw).unwrap_or_else(|| {
                log::warn!("conversation reply was not the expected JSON shape — substituting fallback");
                TutorReply::fallback()
            }),
            Err(e) => {
                log::warn!("conversation completion failed ({e}) — substituting fallback");
                TutorReply::fallback()
            }
        };

        Some(reply)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
