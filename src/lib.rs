//! LifePlan — guided self-assessment and personalized plan client.

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod questionnaire;
pub mod render;
pub mod results;
