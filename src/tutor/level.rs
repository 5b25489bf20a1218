//! CEFR proficiency levels.
//!
//! [`CefrLevel`] is selected once per session and carried through every
//! request to the tutor; the engine only ever reads it.  Besides the wire
//! representation (`"A1"` … `"B2"`) the level also supplies two UI hints:
//! the text-to-speech playback rate and the per-level session greeting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CefrLevel
// ---------------------------------------------------------------------------

/// Learner proficiency tier (Common European Framework of Reference).
///
/// # Example
/// ```rust
/// use sprachheld::tutor::CefrLevel;
///
/// let level: CefrLevel = "B1".parse().unwrap();
/// assert_eq!(level.as_str(), "B1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CefrLevel {
    /// Beginner — simple greetings, basic sentences.
    A1,
    /// Elementary — everyday topics, simple past.
    A2,
    /// Intermediate — opinions, future plans, experiences.
    B1,
    /// Upper intermediate — abstract topics, complex grammar.
    B2,
}

impl CefrLevel {
    /// All levels, lowest first.
    pub const ALL: [CefrLevel; 4] = [
        CefrLevel::A1,
        CefrLevel::A2,
        CefrLevel::B1,
        CefrLevel::B2,
    ];

    /// The wire / display form (`"A1"` … `"B2"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
        }
    }

    /// Suggested German TTS playback rate for this level.
    ///
    /// Beginners get noticeably slowed speech; B1 and up hear normal speed.
    pub fn speech_rate(&self) -> f32 {
        match self {
            CefrLevel::A1 => 0.7,
            CefrLevel::A2 => 0.85,
            CefrLevel::B1 | CefrLevel::B2 => 1.0,
        }
    }

    /// The `(german, english)` greeting shown when a chat session opens.
    pub fn greeting(&self) -> (&'static str, &'static str) {
        match self {
            CefrLevel::A1 => ("Hallo! Wie geht es dir?", "Hello! How are you?"),
            CefrLevel::A2 => (
                "Guten Tag! Worüber möchtest du heute sprechen?",
                "Good day! What would you like to talk about today?",
            ),
            CefrLevel::B1 => (
                "Hallo! Hast du heute etwas Interessantes erlebt?",
                "Hello! Did you experience anything interesting today?",
            ),
            CefrLevel::B2 => (
                "Herzlich willkommen! Möchtest du über ein aktuelles Thema diskutieren?",
                "Welcome! Would you like to discuss a current topic?",
            ),
        }
    }
}

impl Default for CefrLevel {
    fn default() -> Self {
        CefrLevel::A1
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown level string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(pub String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown CEFR level: {:?} (expected A1, A2, B1 or B2)", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for CefrLevel {
    type Err = ParseLevelError;

    /// Case-insensitive parse of `"A1"` … `"B2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A1" => Ok(CefrLevel::A1),
            "A2" => Ok(CefrLevel::A2),
            "B1" => Ok(CefrLevel::B1),
            "B2" => Ok(CefrLevel::B2),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
