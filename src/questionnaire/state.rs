//! Session state machine — step cursor and submission phase.

use serde::{Deserialize, Serialize};

/// Phase of a questionnaire session.
///
/// InProgress → Submitting → Completed | Failed. Completed and Failed are
/// terminal for the session; retrying means a fresh submission, not a
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    InProgress,
    Submitting,
    Completed,
    Failed,
}

impl SessionPhase {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: SessionPhase) -> bool {
        use SessionPhase::*;
        matches!(
            (self, target),
            (InProgress, Submitting) | (Submitting, Completed) | (Submitting, Failed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        Self::InProgress
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::InProgress => "in_progress",
            Self::Submitting => "submitting",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// Index of the active question, clamped to `[0, len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCursor {
    index: usize,
    len: usize,
}

impl StepCursor {
    /// Cursor at the first of `len` steps.
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.len
    }

    /// Move forward one step. Returns false, without moving, on the last step.
    pub fn forward(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Move back one step. Returns false, without moving, on the first step.
    pub fn back(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// `(index + 1) / len`, in `(0, 1]` for a non-empty catalog.
    pub fn fraction(&self) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        (self.index + 1) as f64 / self.len as f64
    }
}
