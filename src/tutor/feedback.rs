//! Text-chat feedback flow.
//!
//! Given raw learner text, return corrected text, an English explanation of
//! the corrections, and a German follow-up question to keep the conversation
//! going.  On any failure the learner's original text is echoed back
//! unchanged with a fixed apology and topic-change prompt — a failed turn
//! must never lose what the learner wrote.

use serde::Deserialize;

use crate::llm::ChatClient;
use crate::tutor::level::CefrLevel;
use crate::tutor::prompt::PromptBuilder;

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

/// Fixed explanation substituted when the completion call or parsing fails.
pub const FALLBACK_EXPLANATION: &str =
    "Entschuldigung, ich konnte das gerade nicht analysieren.";

/// Fixed follow-up offered on failure: a gentle change of topic.
pub const FALLBACK_FOLLOW_UP: &str = "Können wir über etwas anderes sprechen?";

/// English translation of [`FALLBACK_FOLLOW_UP`].
pub const FALLBACK_FOLLOW_UP_TRANSLATION: &str = "Can we talk about something else?";

/// Correction + follow-up produced once per learner text submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// The learner's text with grammar and vocabulary mistakes fixed.
    pub corrected_text: String,
    /// Explanation of the corrections, in English.
    pub explanation: String,
    /// Follow-up question in German, level-appropriate.
    pub follow_up_question: String,
    /// English translation of the follow-up question.
    #[serde(default)]
    pub english_translation: Option<String>,
}

impl Feedback {
    /// The fixed fallback: echo `original` unchanged, apologise, offer to
    /// change topics.
    pub fn fallback(original: &str) -> Self {
        Self {
            corrected_text: original.to_string(),
            explanation: FALLBACK_EXPLANATION.to_string(),
            follow_up_question: FALLBACK_FOLLOW_UP.to_string(),
            english_translation: Some(FALLBACK_FOLLOW_UP_TRANSLATION.to_string()),
        }
    }
}

/// Strict-parse a raw model reply into [`Feedback`].
///
/// Returns `None` on invalid JSON or any missing required key.
pub fn parse_feedback(raw: &str) -> Option<Feedback> {
    serde_json::from_str(raw).ok()
}

// ---------------------------------------------------------------------------
// FeedbackFlow
// ---------------------------------------------------------------------------

/// Drives one feedback request: prompt → completion → parse → feedback.
///
/// # Example
/// ```rust,no_run
/// use sprachheld::config::AppConfig;
/// use sprachheld::llm::ApiClient;
/// use sprachheld::tutor::{CefrLevel, FeedbackFlow};
///
/// #[tokio::main]
/// async fn main() {
///     let config = AppConfig::default();
///     let flow = FeedbackFlow::new(ApiClient::from_config(&config.llm));
///
///     let feedback = flow
///         .review(CefrLevel::A1, "Ich habe ein Hund", None)
///         .await
///         .expect("non-empty input always yields feedback");
///     println!("{} — {}", feedback.corrected_text, feedback.explanation);
/// }
/// ```
pub struct FeedbackFlow<C: ChatClient> {
    client: C,
}

impl<C: ChatClient> FeedbackFlow<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Return a reference to the wrapped client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Review `german_text` and produce correction + follow-up.
    ///
    /// `history` is an optional flat `Student:`/`Tutor:` transcript (see
    /// [`ConversationSession::transcript`](crate::tutor::ConversationSession::transcript)).
    ///
    /// Returns `None` — without issuing any request — when `german_text` is
    /// empty after trimming.  Otherwise this never fails: transport and
    /// parse errors yield [`Feedback::fallback`] built from the original
    /// input.
    pub async fn review(
        &self,
        level: CefrLevel,
        german_text: &str,
        history: Option<&str>,
    ) -> Option<Feedback> {
        let trimmed = german_text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let messages = PromptBuilder::new(level).feedback(trimmed, history);

        let feedback = match self.client.complete(&messages).await {
            Ok(raw) => parse_feedback(&raw).unwrap_or_else(|| {
                log::warn!("feedback reply was not the expected JSON shape — substituting fallback");
                Feedback::fallback(trimmed)
            }),
            Err(e) => {
                log::warn!("feedback completion failed ({e}) — substituting fallback");
                Feedback::fallback(trimmed)
            }
        };

        Some(feedback)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutor::testing::{CountingClient, FailingClient, StaticClient};

    // -----------------------------------------------------------------------
    // Parsing
    // -----------------------------------------------------------------------

    #[test]
    fn parse_well_formed_feedback_is_identity() {
        let raw = r#"{
            "correctedText": "Ich habe einen Hund",
            "explanation": "Hund is masculine, so the accusative article is 'einen'.",
            "followUpQuestion": "Wie heißt dein Hund?",
            "englishTranslation": "What is your dog's name?"
        }"#;

        let feedback = parse_feedback(raw).unwrap();
        assert_eq!(feedback.corrected_text, "Ich habe einen Hund");
        assert_eq!(
            feedback.explanation,
            "Hund is masculine, so the accusative article is 'einen'."
        );
        assert_eq!(feedback.follow_up_question, "Wie heißt dein Hund?");
        assert_eq!(
            feedback.english_translation.as_deref(),
            Some("What is your dog's name?")
        );
    }

    #[test]
    fn parse_rejects_non_json() {
        assert_eq!(parse_feedback("not json"), None);
    }

    #[test]
    fn parse_rejects_missing_required_key() {
        // followUpQuestion absent
        let raw = r#"{"correctedText": "x", "explanation": "y"}"#;
        assert_eq!(parse_feedback(raw), None);
    }

    // -----------------------------------------------------------------------
    // Flow behaviour
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn transport_failure_preserves_original_text() {
        let flow = FeedbackFlow::new(FailingClient::transport());

        let feedback = flow
            .review(CefrLevel::A1, "Ich habe ein Hund", None)
            .await
            .unwrap();

        assert_eq!(feedback.corrected_text, "Ich habe ein Hund");
        assert_eq!(feedback.explanation, FALLBACK_EXPLANATION);
        assert_eq!(feedback.follow_up_question, FALLBACK_FOLLOW_UP);
    }

    #[tokio::test]
    async fn every_failure_kind_yields_the_same_fallback() {
        for client in [
            FailingClient::transport(),
            FailingClient::timeout(),
            FailingClient::status(),
            FailingClient::empty(),
        ] {
            let flow = FeedbackFlow::new(client);
            let feedback = flow
                .review(CefrLevel::A2, "Ich gehe zu Schule", None)
                .await
                .unwrap();
            assert_eq!(feedback, Feedback::fallback("Ich gehe zu Schule"));
        }
    }

    #[tokio::test]
    async fn malformed_reply_falls_back_idempotently() {
        let flow = FeedbackFlow::new(StaticClient::new(r#"{"correctedText": "only one key"}"#));

        let first = flow.review(CefrLevel::B2, "Testsatz", None).await.unwrap();
        let second = flow.review(CefrLevel::B2, "Testsatz", None).await.unwrap();

        assert_eq!(first, Feedback::fallback("Testsatz"));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn empty_input_never_reaches_the_client() {
        let flow = FeedbackFlow::new(CountingClient::failing());

        assert!(flow.review(CefrLevel::A1, "", None).await.is_none());
        assert!(flow.review(CefrLevel::A1, "  \t\n", None).await.is_none());

        assert_eq!(flow.client().calls(), 0);
    }

    #[tokio::test]
    async fn transcript_is_embedded_in_the_request() {
        let flow = FeedbackFlow::new(CountingClient::ok(
            r#"{"correctedText": "Gut", "explanation": "ok", "followUpQuestion": "Und?", "englishTranslation": "And?"}"#,
        ));

        let transcript = "Tutor: Wie geht es dir?\nStudent: Gut";
        flow.review(CefrLevel::A1, "Gut", Some(transcript))
            .await
            .unwrap();

        let seen = flow.client().last_messages();
        assert_eq!(seen.len(), 2);
        assert!(seen[1].content.contains("Context/History:"));
        assert!(seen[1].content.contains("Student: Gut"));
    }

    #[tokio::test]
    async fn input_is_trimmed_before_the_request() {
        let flow = FeedbackFlow::new(CountingClient::ok(
            r#"{"correctedText": "Hallo", "explanation": "ok", "followUpQuestion": "Und?", "englishTranslation": "And?"}"#,
        ));

        flow.review(CefrLevel::A1, "  Hallo  ", None).await.unwrap();

        let seen = flow.client().last_messages();
        assert!(seen[1].content.contains("Student Input: \"Hallo\""));
    }
}
