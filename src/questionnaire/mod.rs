//! Questionnaire — the guided, multi-step self-assessment.
//!
//! A static catalog of questions (`schema`) defines both the shape of the
//! answer record (`answers`) and the order in which the engine walks the
//! user through them. When the last question is advanced past, the engine
//! submits the record and hands back the service-assigned identifier.

pub mod answers;
pub mod engine;
pub mod schema;
pub mod state;

pub use answers::{AnswerRecord, AnswerValue, RangePart};
pub use engine::{AdvanceOutcome, QuestionnaireEngine};
pub use schema::{AnswerShape, QuestionDefinition, QuestionKind, QuestionSchema, RangeSlider};
pub use state::{SessionPhase, StepCursor};
