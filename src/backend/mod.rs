//! Coaching service access.
//!
//! The questionnaire engine and the results orchestrator only see the
//! `CoachingBackend` trait; `HttpBackend` speaks the service's JSON API.

pub mod http;
#[cfg(test)]
pub(crate) mod stub;
pub mod traits;

pub use http::HttpBackend;
pub use traits::CoachingBackend;
