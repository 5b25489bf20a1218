//! Per-session conversation history.
//!
//! [`ConversationSession`] holds the ordered learner/tutor turns for the
//! lifetime of one chat screen.  Insertion order is semantically meaningful:
//! the turns are replayed to the model as context on every request, so the
//! history is append-only and mutated by exactly one owner (the session
//! loop) — speech-end and completion callbacks must route their updates
//! through that owner rather than writing here concurrently.

use std::fmt;

// ---------------------------------------------------------------------------
// Role / Turn
// ---------------------------------------------------------------------------

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The human learner.
    Learner,
    /// The AI tutor.
    Tutor,
}

impl Role {
    /// The model-side role name this maps to on the wire.
    ///
    /// Learner turns become `"user"`, tutor turns become `"assistant"`.
    /// Swapping these silently corrupts the model's sense of who said what,
    /// so the mapping lives in exactly one place.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Role::Learner => "user",
            Role::Tutor => "assistant",
        }
    }

    /// The label used when rendering a flat transcript (`Student:` / `Tutor:`).
    pub fn transcript_label(&self) -> &'static str {
        match self {
            Role::Learner => "Student",
            Role::Tutor => "Tutor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.transcript_label())
    }
}

/// One message exchanged within a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn learner(content: impl Into<String>) -> Self {
        Self {
            role: Role::Learner,
            content: content.into(),
        }
    }

    pub fn tutor(content: impl Into<String>) -> Self {
        Self {
            role: Role::Tutor,
            content: content.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// ConversationSession
// ---------------------------------------------------------------------------

/// Append-only ordered turn history for one chat screen.
///
/// # Example
/// ```rust
/// use sprachheld::tutor::{ConversationSession, Role};
///
/// let mut session = ConversationSession::new();
/// session.push_learner("Ich heiße Anna.");
/// session.push_tutor("Schön, dich kennenzulernen, Anna!");
/// assert_eq!(session.turns().len(), 2);
/// assert_eq!(session.turns()[0].role, Role::Learner);
/// ```
#[derive(Debug, Default)]
pub struct ConversationSession {
    turns: Vec<Turn>,
}

impl ConversationSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Append a learner turn.
    pub fn push_learner(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::learner(content));
    }

    /// Append a tutor turn.
    pub fn push_tutor(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::tutor(content));
    }

    /// Drop all history (navigating to a new chat restarts the session).
    pub fn reset(&mut self) {
        self.turns.clear();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The full history in chronological order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns so far.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns `true` when no turn has been exchanged yet.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Render the history as a flat `Student:` / `Tutor:` transcript.
    ///
    /// The text-feedback flow embeds this in its prompt instead of a
    /// role-mapped message list.  Returns `None` when the session is empty.
    pub fn transcript(&self) -> Option<String> {
        if self.turns.is_empty() {
            return None;
        }
        let lines: Vec<String> = self
            .turns
            .iter()
            .map(|t| format!("{}: {}", t.role.transcript_label(), t.content))
            .collect();
        Some(lines.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
