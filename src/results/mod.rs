//! Results — profile and plan generation for a submitted questionnaire.

pub mod model;
pub mod orchestrator;

pub use model::{
    Dimension, HabitStackEntry, PlanRecord, ProfileId, ProfileRecord, QuestionnaireId, TimeBlock,
};
pub use orchestrator::{ResultsOrchestrator, ResultsView};
