//! Voice-mode state machine and shared session state.
//!
//! [`VoiceState`] models the speech capture/playback cycle with at most one
//! active state at a time.  [`VoiceSession`] guards the transitions and is
//! the single source of truth for everything the voice UI needs: current
//! phase, live transcript, last tutor reply, pending correction, mute flag,
//! and any error message.
//!
//! [`SharedVoiceSession`] is a type alias for `Arc<Mutex<VoiceSession>>` —
//! cheap to clone and safe to share between the capture callback and the
//! completion task.  All history/state mutation funnels through this one
//! owner so speech-end and completion-resolution updates cannot interleave.

use std::sync::{Arc, Mutex};

use thiserror::Error;

// ---------------------------------------------------------------------------
// VoiceState
// ---------------------------------------------------------------------------

/// States of the voice chat cycle.
///
/// The state machine transitions are:
///
/// ```text
/// Idle ──mic tap──────▶ Listening
///      ──stop capture─▶ Thinking   (synchronously; empty transcript → Idle)
///                       ──reply──▶ Speaking   (or Idle when muted)
/// Speaking ──TTS done─▶ Idle
/// any state ──error───▶ Idle      (with an error message set)
/// ```
///
/// Listening must never begin while Thinking or Speaking is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    /// Waiting for the learner to tap the microphone.
    Idle,

    /// Speech recognition is capturing; the live transcript is updating.
    Listening,

    /// Capture has ended; a completion request is in flight.  No further
    /// submission is accepted until it resolves.
    Thinking,

    /// The tutor's reply is being played back.
    Speaking,
}

impl VoiceState {
    /// Returns `true` while a completion request is outstanding or playback
    /// is running — the phases during which a new capture must be refused.
    ///
    /// ```
    /// use sprachheld::voice::VoiceState;
    ///
    /// assert!(!VoiceState::Idle.blocks_listening());
    /// assert!(!VoiceState::Listening.blocks_listening());
    /// assert!(VoiceState::Thinking.blocks_listening());
    /// assert!(VoiceState::Speaking.blocks_listening());
    /// ```
    pub fn blocks_listening(&self) -> bool {
        matches!(self, VoiceState::Thinking | VoiceState::Speaking)
    }

    /// A short human-readable label suitable for the UI status line.
    pub fn label(&self) -> &'static str {
        match self {
            VoiceState::Idle => "Tap the mic to speak",
            VoiceState::Listening => "Listening...",
            VoiceState::Thinking => "Thinking...",
            VoiceState::Speaking => "Tutor Speaking",
        }
    }
}

impl Default for VoiceState {
    fn default() -> Self {
        VoiceState::Idle
    }
}

// ---------------------------------------------------------------------------
// VoiceStateError
// ---------------------------------------------------------------------------

/// Rejected state transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoiceStateError {
    /// Listening was requested while the session was not idle.
    #[error("cannot start listening while in the {0:?} state")]
    NotIdle(VoiceState),
}

// ---------------------------------------------------------------------------
// VoiceSession
// ---------------------------------------------------------------------------

/// Per-screen voice session state with guarded transitions.
pub struct VoiceSession {
    state: VoiceState,

    /// Live transcript accumulated while Listening.
    transcript: String,

    /// The tutor's most recent reply, if any.
    last_reply: Option<String>,

    /// Pending mistake correction to surface after the reply.
    correction: Option<crate::tutor::Correction>,

    /// When muted, replies skip the Speaking phase entirely.
    muted: bool,

    /// Error message to display after a failed turn.
    error_message: Option<String>,
}

impl VoiceSession {
    /// Create an idle session.
    pub fn new() -> Self {
        Self {
            state: VoiceState::Idle,
            transcript: String::new(),
            last_reply: None,
            correction: None,
            muted: false,
            error_message: None,
        }
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Begin speech capture.
    ///
    /// Allowed only from [`VoiceState::Idle`]; in particular a tap while the
    /// tutor is thinking or speaking is rejected rather than queued.  Starting
    /// a capture clears the previous transcript, correction, and error.
    pub fn start_listening(&mut self) -> Result<(), VoiceStateError> {
        if self.state != VoiceState::Idle {
            return Err(VoiceStateError::NotIdle(self.state));
        }
        self.transcript.clear();
        self.correction = None;
        self.error_message = None;
        self.state = VoiceState::Listening;
        Ok(())
    }

    /// Replace the live transcript (interim recognition results).
    ///
    /// Ignored outside the Listening state.
    pub fn update_transcript(&mut self, text: impl Into<String>) {
        if self.state == VoiceState::Listening {
            self.transcript = text.into();
        }
    }

    /// End speech capture and synchronously enter the next pipeline stage.
    ///
    /// Returns the trimmed transcript to submit (now in Thinking), or `None`
    /// when the capture produced only whitespace — in that case the session
    /// returns straight to Idle and no request must be issued.
    pub fn stop_listening(&mut self) -> Option<String> {
        if self.state != VoiceState::Listening {
            return None;
        }
        let spoken = self.transcript.trim().to_string();
        if spoken.is_empty() {
            self.state = VoiceState::Idle;
            return None;
        }
        self.state = VoiceState::Thinking;
        Some(spoken)
    }

    /// Record the tutor's reply and move to playback (or Idle when muted).
    pub fn reply_ready(&mut self, reply: impl Into<String>) {
        if self.state != VoiceState::Thinking {
            return;
        }
        self.last_reply = Some(reply.into());
        self.state = if self.muted {
            VoiceState::Idle
        } else {
            VoiceState::Speaking
        };
    }

    /// Playback finished; return to Idle.
    pub fn finish_speaking(&mut self) {
        if self.state == VoiceState::Speaking {
            self.state = VoiceState::Idle;
        }
    }

    /// Abort the current turn from any state and return to Idle.
    ///
    /// The session stays recoverable: the next mic tap starts a fresh turn.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
        self.state = VoiceState::Idle;
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn last_reply(&self) -> Option<&str> {
        self.last_reply.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn set_correction(&mut self, correction: crate::tutor::Correction) {
        self.correction = Some(correction);
    }

    /// Take the pending correction, leaving `None`.
    pub fn take_correction(&mut self) -> Option<crate::tutor::Correction> {
        self.correction.take()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl Default for VoiceSession {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// SharedVoiceSession
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`VoiceSession`].
///
/// Cheap to clone (`Arc` clone).  Lock for short critical sections only; do
/// **not** hold the lock across `.await` points.
pub type SharedVoiceSession = Arc<Mutex<VoiceSession>>;

/// Construct a new [`SharedVoiceSession`] wrapping an idle session.
pub fn new_shared_session() -> SharedVoiceSession {
    Arc::new(Mutex::new(VoiceSession::new()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- VoiceState ---

    #[test]
    fn default_state_is_idle() {
        assert_eq!(VoiceState::default(), VoiceState::Idle);
    }

    #[test]
    fn only_thinking_and_speaking_block_listening() {
        assert!(!VoiceState::Idle.blocks_listening());
        assert!(!VoiceState::Listening.blocks_listening());
        assert!(VoiceState::Thinking.blocks_listening());
        assert!(VoiceState::Speaking.blocks_listening());
    }

    #[test]
    fn labels_are_distinct() {
        let labels = [
            VoiceState::Idle.label(),
            VoiceState::Listening.label(),
            VoiceState::Thinking.label(),
            VoiceState::Speaking.label(),
        ];
        for (i, a) in labels.iter().enumerate() {
            for b in &labels[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    // ---- Happy-path cycle ---

    #[test]
    fn full_cycle_idle_listen_think_speak_idle() {
        let mut session = VoiceSession::new();

        session.start_listening().unwrap();
        assert_eq!(session.state(), VoiceState::Listening);

        session.update_transcript("Ich bin Hunger");
        let spoken = session.stop_listening().unwrap();
        assert_eq!(spoken, "Ich bin Hunger");
        assert_eq!(session.state(), VoiceState::Thinking);

        session.reply_ready("Ah, du meinst: Ich habe Hunger!");
        assert_eq!(session.state(), VoiceState::Speaking);
        assert_eq!(session.last_reply(), Some("Ah, du meinst: Ich habe Hunger!"));

        session.finish_speaking();
        assert_eq!(session.state(), VoiceState::Idle);
    }

    // ---- Guards ---

    #[test]
    fn listening_is_rejected_while_thinking() {
        let mut session = VoiceSession::new();
        session.start_listening().unwrap();
        session.update_transcript("Hallo");
        session.stop_listening().unwrap();

        assert_eq!(
            session.start_listening(),
            Err(VoiceStateError::NotIdle(VoiceState::Thinking))
        );
    }

    #[test]
    fn listening_is_rejected_while_speaking() {
        let mut session = VoiceSession::new();
        session.start_listening().unwrap();
        session.update_transcript("Hallo");
        session.stop_listening().unwrap();
        session.reply_ready("Hallo!");

        assert_eq!(
            session.start_listening(),
            Err(VoiceStateError::NotIdle(VoiceState::Speaking))
        );
    }

    #[test]
    fn whitespace_transcript_returns_to_idle_without_submission() {
        let mut session = VoiceSession::new();
        session.start_listening().unwrap();
        session.update_transcript("   \n ");

        assert_eq!(session.stop_listening(), None);
        assert_eq!(session.state(), VoiceState::Idle);
    }

    #[test]
    fn muted_session_skips_speaking() {
        let mut session = VoiceSession::new();
        session.set_muted(true);
        session.start_listening().unwrap();
        session.update_transcript("Hallo");
        session.stop_listening().unwrap();

        session.reply_ready("Hallo zurück!");
        assert_eq!(session.state(), VoiceState::Idle);
        assert_eq!(session.last_reply(), Some("Hallo zurück!"));
    }

    #[test]
    fn transcript_updates_ignored_outside_listening() {
        let mut session = VoiceSession::new();
        session.update_transcript("should be dropped");
        assert_eq!(session.transcript(), "");
    }

    // ---- Failure handling ---

    #[test]
    fn failure_returns_to_idle_and_stays_recoverable() {
        let mut session = VoiceSession::new();
        session.start_listening().unwrap();
        session.update_transcript("Hallo");
        session.stop_listening().unwrap();

        session.fail("completion failed");
        assert_eq!(session.state(), VoiceState::Idle);
        assert_eq!(session.error_message(), Some("completion failed"));

        // Next turn proceeds normally and clears the error.
        session.start_listening().unwrap();
        assert_eq!(session.error_message(), None);
    }

    #[test]
    fn starting_a_capture_clears_previous_turn_artifacts() {
        let mut session = VoiceSession::new();
        session.set_correction(crate::tutor::Correction {
            english_explanation: "x".into(),
            german_follow_up: "y".into(),
        });
        session.start_listening().unwrap();
        assert!(session.take_correction().is_none());
    }

    // ---- SharedVoiceSession ---

    #[test]
    fn shared_session_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedVoiceSession>();
    }

    #[test]
    fn shared_session_can_be_cloned_and_mutated() {
        let session = new_shared_session();
        let session2 = Arc::clone(&session);

        session.lock().unwrap().start_listening().unwrap();
        assert_eq!(session2.lock().unwrap().state(), VoiceState::Listening);
    }
}
