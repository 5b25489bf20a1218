//! Voice-chat error-correction flow.
//!
//! When the mistake detector fires on a spoken learner message, this flow
//! asks the model for an encouraging English explanation and a German
//! practice follow-up.  The corrected form is already known before the call
//! is made, so on failure the learner still sees it: the fallback's
//! follow-up *is* the corrected text, never re-derived.

use serde::Deserialize;

use crate::llm::ChatClient;
use crate::tutor::level::CefrLevel;
use crate::tutor::prompt::PromptBuilder;

// ---------------------------------------------------------------------------
// MistakeReport / Correction
// ---------------------------------------------------------------------------

/// Fixed encouraging message substituted when the completion call or its
/// parsing fails.
pub const FALLBACK_ENCOURAGEMENT: &str =
    "Good try! Let's look at the correct form together.";

/// A detected learner mistake, as handed to the correction flow.
///
/// Detection itself is the caller's concern (see
/// [`MistakeDetector`](crate::tutor::MistakeDetector)); this flow only turns
/// an already-identified mistake into tutoring output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MistakeReport {
    /// What the learner actually said, in German.
    pub user_message: String,
    /// The corrected version of the learner's message.
    pub corrected_message: String,
    /// Short rationale for the correction, in English.
    pub explanation: String,
    /// The learner's CEFR level.
    pub level: CefrLevel,
}

/// Tutor output produced once per detected-mistake event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correction {
    /// The tutor's explanation of the error, in English.
    pub english_explanation: String,
    /// The tutor's follow-up practice line, in German.
    pub german_follow_up: String,
}

impl Correction {
    /// The fixed fallback: encouragement plus the already-known corrected
    /// text as the follow-up.
    pub fn fallback(report: &MistakeReport) -> Self {
        Self {
            english_explanation: FALLBACK_ENCOURAGEMENT.to_string(),
            german_follow_up: report.corrected_message.clone(),
        }
    }
}

/// Strict-parse a raw model reply into a [`Correction`].
///
/// Returns `None` on invalid JSON or any missing required key.
pub fn parse_correction(raw: &str) -> Option<Correction> {
    serde_json::from_str(raw).ok()
}

// ---------------------------------------------------------------------------
// CorrectionFlow
// ---------------------------------------------------------------------------

/// Drives one error-correction request: prompt → completion → parse →
/// correction.
pub struct CorrectionFlow<C: ChatClient> {
    client: C,
}

impl<C: ChatClient> CorrectionFlow<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Return a reference to the wrapped client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Turn a detected mistake into an explanation + practice follow-up.
    ///
    /// Never fails: transport and parse errors yield
    /// [`Correction::fallback`], which guarantees the learner sees the
    /// correct form even when the model call does not go through.
    pub async fn correct(&self, report: &MistakeReport) -> Correction {
        let messages = PromptBuilder::new(report.level).correction(
            &report.user_message,
            &report.corrected_message,
            &report.explanation,
        );

        match self.client.complete(&messages).await {
            Ok(raw) => parse_correction(&raw).unwrap_or_else(|| {
                log::warn!("correction reply was not the expected JSON shape — substituting fallback");
                Correction::fallback(report)
            }),
            Err(e) => {
                log::warn!("correction completion failed ({e}) — substituting fallback");
                Correction::fallback(report)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
