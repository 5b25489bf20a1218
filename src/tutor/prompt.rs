//! Prompt builder for the three tutor flows.
//!
//! [`PromptBuilder`] turns UI state (level, topic, latest input, history)
//! into the ordered message list a [`ChatClient`](crate::llm::ChatClient)
//! sends out.  Every system instruction states the output-language rules and
//! a strict-JSON output contract with named keys; the flows parse replies
//! against exactly those keys.
//!
//! The builder is pure — no side effects, no I/O.  Callers are responsible
//! for suppressing whitespace-only learner input *before* invoking it (the
//! flows enforce this).

use crate::llm::ChatMessage;
use crate::tutor::level::CefrLevel;
use crate::tutor::session::Turn;

// ---------------------------------------------------------------------------
// JSON output contracts
// ---------------------------------------------------------------------------

const CONVERSATION_JSON_CONTRACT: &str = r#"You must respond strictly in JSON format:
{"tutorMessage": "...", "shouldIntroduceNewConcept": true|false}"#;

const FEEDBACK_JSON_CONTRACT: &str = r#"You must respond strictly in JSON format:
{"correctedText": "...", "explanation": "...", "followUpQuestion": "...", "englishTranslation": "..."}"#;

const CORRECTION_JSON_CONTRACT: &str = r#"You must respond strictly in JSON format:
{"englishExplanation": "...", "germanFollowUp": "..."}"#;

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds role-mapped message lists for the conversational, feedback, and
/// error-correction flows.
///
/// # Example
/// ```rust
/// use sprachheld::tutor::{CefrLevel, PromptBuilder};
///
/// let builder = PromptBuilder::new(CefrLevel::A1);
/// let messages = builder.conversation("Daily conversation", "Ich bin Hunger", &[]);
/// assert_eq!(messages[0].role, "system");
/// assert_eq!(messages.last().unwrap().content, "Ich bin Hunger");
/// ```
pub struct PromptBuilder {
    level: CefrLevel,
}

impl PromptBuilder {
    /// Create a builder for the learner's current level.
    pub fn new(level: CefrLevel) -> Self {
        Self { level }
    }

    // -----------------------------------------------------------------------
    // Conversational flow
    // -----------------------------------------------------------------------

    /// Build the message list for one conversational turn.
    ///
    /// Structure: system instruction (level + topic), then `history` in
    /// chronological order with learner turns as `user` and tutor turns as
    /// `assistant`, then `user_message` as the final `user` message.
    pub fn conversation(
        &self,
        topic: &str,
        user_message: &str,
        history: &[Turn],
    ) -> Vec<ChatMessage> {
        let system = format!(
            "You are a German language tutor adapting to the user's level ({level}) and \
             current topic ({topic}).\n\n\
             The user will send a message in German, and your job is to respond in German \
             and help them improve their German language skills.\n\
             The CEFR level is an important aspect of this task. Use vocabulary appropriate \
             for the level, keep sentence structure appropriate for the level, and correct \
             any mistakes the user makes.\n\n\
             Consider the user's message and the conversation history. Decide whether to \
             introduce a new concept or reinforce familiar ones, and set the \
             shouldIntroduceNewConcept boolean accordingly. If they are struggling, \
             reinforce familiar concepts. If they are doing well, introduce new concepts.\n\n\
             {contract}",
            level = self.level,
            topic = topic,
            contract = CONVERSATION_JSON_CONTRACT,
        );

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(system));
        for turn in history {
            messages.push(ChatMessage {
                role: turn.role.wire_name(),
                content: turn.content.clone(),
            });
        }
        messages.push(ChatMessage::user(user_message));
        messages
    }

    // -----------------------------------------------------------------------
    // Text feedback flow
    // -----------------------------------------------------------------------

    /// Build the message list for one text-feedback request.
    ///
    /// The feedback flow carries history as a flat transcript inside the
    /// user message rather than as a role-mapped message list.
    pub fn feedback(&self, german_text: &str, history: Option<&str>) -> Vec<ChatMessage> {
        let system = format!(
            "You are a helpful German language tutor.\n\
             The student is at level {level}.\n\n\
             Your task:\n\
             1. Correct any grammar or vocabulary mistakes in the student's input.\n\
             2. Provide a brief explanation in English for the corrections.\n\
             3. Ask a follow-up question in German appropriate for their level ({level}).\n\
             4. Provide an English translation for that follow-up question.\n\n\
             {contract}",
            level = self.level,
            contract = FEEDBACK_JSON_CONTRACT,
        );

        let mut user = format!("Student Input: \"{german_text}\"");
        if let Some(transcript) = history {
            user.push_str("\nContext/History:\n");
            user.push_str(transcript);
        }

        vec![ChatMessage::system(system), ChatMessage::user(user)]
    }

    // -----------------------------------------------------------------------
    // Error-correction flow
    // -----------------------------------------------------------------------

    /// Build the message list for one error-correction request.
    ///
    /// `explanation` is the short caller-side rationale for the detected
    /// mistake; the model expands it into an encouraging English explanation
    /// plus a German practice follow-up.
    pub fn correction(
        &self,
        user_message: &str,
        corrected_message: &str,
        explanation: &str,
    ) -> Vec<ChatMessage> {
        let system = format!(
            "You are a German language tutor. The student made a mistake in their spoken \
             German.\n\n\
             First, provide an encouraging explanation of the error in English. Then, \
             provide a follow-up question in German appropriate for CEFR level {level} to \
             encourage them to continue the conversation.\n\n\
             {contract}",
            level = self.level,
            contract = CORRECTION_JSON_CONTRACT,
        );

        let user = format!(
            "Original (incorrect) message: \"{user_message}\"\n\
             Corrected message: \"{corrected_message}\"\n\
             Error explanation: {explanation}"
        );

        vec![ChatMessage::system(system), ChatMessage::user(user)]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutor::session::Turn;

    // -----------------------------------------------------------------------
    // Conversational flow
    // -----------------------------------------------------------------------

    #[test]
    fn conversation_system_mentions_level_and_topic() {
        let builder = PromptBuilder::new(CefrLevel::B1);
        let messages = builder.conversation("Reisen", "Ich fliege nach Berlin", &[]);

        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("B1"));
        assert!(messages[0].content.contains("Reisen"));
        assert!(messages[0].content.contains("shouldIntroduceNewConcept"));
        assert!(messages[0].content.contains("tutorMessage"));
    }

    #[test]
    fn conversation_preserves_history_order_and_role_mapping() {
        let builder = PromptBuilder::new(CefrLevel::A2);
        let history = vec![
            Turn::learner("Hallo!"),
            Turn::tutor("Hallo! Wie geht's?"),
            Turn::learner("Gut, danke."),
        ];
        let messages = builder.conversation("Alltag", "Und dir?", &history);

        // system + 3 history turns + latest message
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "Hallo!");
        assert_eq!(messages[2].role, "assistant");
        assert_eq!(messages[2].content, "Hallo! Wie geht's?");
        assert_eq!(messages[3].role, "user");
        assert_eq!(messages[3].content, "Gut, danke.");
        assert_eq!(messages[4].role, "user");
        assert_eq!(messages[4].content, "Und dir?");
    }

    #[test]
    fn conversation_with_empty_history_has_two_messages() {
        let builder = PromptBuilder::new(CefrLevel::A1);
        let messages = builder.conversation("Essen", "Ich mag Brot", &[]);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
    }

    // -----------------------------------------------------------------------
    // Feedback flow
    // -----------------------------------------------------------------------

    #[test]
    fn feedback_system_names_all_json_keys() {
        let builder = PromptBuilder::new(CefrLevel::A1);
        let messages = builder.feedback("Ich habe ein Hund", None);

        let system = &messages[0].content;
        assert!(system.contains("correctedText"));
        assert!(system.contains("explanation"));
        assert!(system.contains("followUpQuestion"));
        assert!(system.contains("englishTranslation"));
        assert!(system.contains("A1"));
    }

    #[test]
    fn feedback_user_msg_quotes_student_input() {
        let builder = PromptBuilder::new(CefrLevel::A1);
        let messages = builder.feedback("Ich habe ein Hund", None);

        assert_eq!(messages.len(), 2);
        assert!(messages[1].content.contains("Student Input: \"Ich habe ein Hund\""));
        assert!(!messages[1].content.contains("Context/History"));
    }

    #[test]
    fn feedback_embeds_transcript_when_present() {
        let builder = PromptBuilder::new(CefrLevel::B2);
        let transcript = "Tutor: Wie geht es dir?\nStudent: Mir geht es gut.";
        let messages = builder.feedback("Was machst du?", Some(transcript));

        assert!(messages[1].content.contains("Context/History:"));
        assert!(messages[1].content.contains("Student: Mir geht es gut."));
    }

    // -----------------------------------------------------------------------
    // Correction flow
    // -----------------------------------------------------------------------

    #[test]
    fn correction_carries_both_forms_and_rationale() {
        let builder = PromptBuilder::new(CefrLevel::A1);
        let messages = builder.correction(
            "ich bin hunger",
            "Ich habe Hunger.",
            "In German, you say 'I have hunger'.",
        );

        assert_eq!(messages.len(), 2);
        assert!(messages[0].content.contains("englishExplanation"));
        assert!(messages[0].content.contains("germanFollowUp"));
        assert!(messages[0].content.contains("A1"));
        assert!(messages[1].content.contains("ich bin hunger"));
        assert!(messages[1].content.contains("Ich habe Hunger."));
        assert!(messages[1].content.contains("I have hunger"));
    }
}
