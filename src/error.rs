//! Error types for LifePlan.

use crate::questionnaire::schema::AnswerShape;
use crate::questionnaire::state::SessionPhase;

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors from the remote coaching service.
///
/// `Clone` so that terminal engine and orchestrator states can hold on to
/// the cause for diagnostics.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BackendError {
    #[error("{operation} request failed: {reason}")]
    RequestFailed { operation: String, reason: String },

    #[error("{operation} returned HTTP {status}: {body}")]
    Status {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {operation}: {reason}")]
    InvalidResponse { operation: String, reason: String },

    #[error("{operation}: resource not found")]
    NotFound { operation: String },
}

/// Errors raised while editing or navigating a questionnaire session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionnaireError {
    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("Answer for {question} must be {expected}, got {actual}")]
    ShapeMismatch {
        question: String,
        expected: AnswerShape,
        actual: AnswerShape,
    },

    #[error("Question {question} is not a {expected} question")]
    WrongKind {
        question: String,
        expected: &'static str,
    },

    #[error("Slot {slot} is out of range for {question}")]
    SlotOutOfRange { question: String, slot: usize },

    #[error("Step {step} is outside the catalog of {len} questions")]
    StepOutOfBounds { step: usize, len: usize },

    #[error("Answers cannot be edited while the session is {phase}")]
    NotEditable { phase: SessionPhase },
}

/// Failures of the questionnaire-to-plan flow.
///
/// The orchestrator collapses `ProfileCreation` and `PlanCreation` into a
/// single user-visible error state, but the variants stay distinct here
/// and in the logs.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FlowError {
    #[error("Questionnaire submission failed: {0}")]
    Submission(BackendError),

    #[error("Profile creation failed: {0}")]
    ProfileCreation(BackendError),

    #[error("Plan creation failed: {0}")]
    PlanCreation(BackendError),
}

impl FlowError {
    /// Short machine-readable label for the failing step.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Submission(_) => "submission",
            Self::ProfileCreation(_) => "profile_creation",
            Self::PlanCreation(_) => "plan_creation",
        }
    }

    /// The underlying backend failure.
    pub fn cause(&self) -> &BackendError {
        match self {
            Self::Submission(e) | Self::ProfileCreation(e) | Self::PlanCreation(e) => e,
        }
    }
}
