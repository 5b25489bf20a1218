//! Heuristic mistake detection for learner speech.
//!
//! [`CommonMistakeDetector`] scans a learner message for known
//! literal-translation mistakes ("Ich bin Hunger" for "I am hungry") and
//! returns the corrected form plus a short rationale.  This is a substring
//! heuristic, not a grammar checker — it only ever fires on the patterns in
//! its table.  The [`MistakeDetector`] trait keeps the seam open for
//! rule-based or model-based detectors to be substituted.

use crate::tutor::correction::MistakeReport;
use crate::tutor::level::CefrLevel;

// ---------------------------------------------------------------------------
// Internal types
// ---------------------------------------------------------------------------

struct MistakePattern {
    /// Lowercased substring that triggers this pattern.
    trigger: &'static str,
    corrected: &'static str,
    explanation: &'static str,
}

// ---------------------------------------------------------------------------
// Static pattern definitions
// ---------------------------------------------------------------------------

static PATTERNS: &[MistakePattern] = &[
    MistakePattern {
        trigger: "ich bin hunger",
        corrected: "Ich habe Hunger.",
        explanation:
            "In German, you say 'I have hunger' (Ich habe Hunger) instead of 'I am hungry'.",
    },
    MistakePattern {
        trigger: "ich bin durst",
        corrected: "Ich habe Durst.",
        explanation:
            "In German, you say 'I have thirst' (Ich habe Durst) instead of 'I am thirsty'.",
    },
];

// ---------------------------------------------------------------------------
// MistakeDetector
// ---------------------------------------------------------------------------

/// A detected common mistake: the corrected form and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedMistake {
    pub corrected: String,
    pub explanation: String,
}

impl DetectedMistake {
    /// Package this detection as a [`MistakeReport`] for the correction flow.
    pub fn into_report(self, user_message: &str, level: CefrLevel) -> MistakeReport {
        MistakeReport {
            user_message: user_message.to_string(),
            corrected_message: self.corrected,
            explanation: self.explanation,
            level,
        }
    }
}

/// Pluggable predicate over learner text.
///
/// Returns `Some` when the message contains a known mistake worth an
/// opportunistic correction, `None` otherwise.
pub trait MistakeDetector: Send + Sync {
    fn detect(&self, text: &str) -> Option<DetectedMistake>;
}

// ---------------------------------------------------------------------------
// CommonMistakeDetector
// ---------------------------------------------------------------------------

/// Detects known literal-translation mistakes by case-insensitive substring
/// match against a built-in table.
///
/// # Example
/// ```rust
/// use sprachheld::tutor::{CommonMistakeDetector, MistakeDetector};
///
/// let detector = CommonMistakeDetector::new();
/// let mistake = detector.detect("Ich bin Hunger").unwrap();
/// assert_eq!(mistake.corrected, "Ich habe Hunger.");
/// ```
pub struct CommonMistakeDetector;

impl CommonMistakeDetector {
    /// Create a detector with the built-in pattern table.
    pub fn new() -> Self {
        Self
    }
}

impl Default for CommonMistakeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl MistakeDetector for CommonMistakeDetector {
    /// Return the first matching pattern, or `None` for clean text.
    fn detect(&self, text: &str) -> Option<DetectedMistake> {
        let lowered = text.to_lowercase();
        PATTERNS
            .iter()
            .find(|p| lowered.contains(p.trigger))
            .map(|p| DetectedMistake {
                corrected: p.corrected.to_string(),
                explanation: p.explanation.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
