//! Voice-mode module for Sprachheld.
//!
//! Speech capture and synthesis themselves are external capabilities (the
//! browser's recognition/synthesis APIs); this module owns only the state
//! machine that sequences them and the shared per-screen session state.
//!
//! # Architecture
//!
//! ```text
//! mic tap ──▶ VoiceSession::start_listening()      Idle → Listening
//! interim results ──▶ update_transcript()
//! capture end ──▶ stop_listening()                 Listening → Thinking
//!       │                                          (empty transcript → Idle)
//!       ├─ ConversationFlow::reply()  ← one request in flight
//!       ├─ MistakeDetector::detect()  → CorrectionFlow::correct() (optional)
//!       └─ reply_ready()                           Thinking → Speaking
//! playback end ──▶ finish_speaking()               Speaking → Idle
//! any failure ──▶ fail()                           → Idle (recoverable)
//! ```

pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use state::{new_shared_session, SharedVoiceSession, VoiceSession, VoiceState, VoiceStateError};
