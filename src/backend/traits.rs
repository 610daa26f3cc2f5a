//! `CoachingBackend` trait — the remote operations the questionnaire flow
//! depends on.

use async_trait::async_trait;

use crate::error::BackendError;
use crate::questionnaire::AnswerRecord;
use crate::results::{PlanRecord, ProfileId, ProfileRecord, QuestionnaireId};

/// Request/response operations of the coaching service.
///
/// Implementations must not retry on their own; every failure is reported
/// to the caller.
#[async_trait]
pub trait CoachingBackend: Send + Sync {
    /// Store a completed answer record and return its identifier.
    async fn submit_questionnaire(
        &self,
        answers: &AnswerRecord,
    ) -> Result<QuestionnaireId, BackendError>;

    /// Derive a profile from a stored questionnaire.
    async fn create_profile(
        &self,
        questionnaire_id: &QuestionnaireId,
    ) -> Result<ProfileRecord, BackendError>;

    /// Generate a plan for a profile.
    async fn create_plan(&self, profile_id: &ProfileId) -> Result<PlanRecord, BackendError>;

    /// Fetch a previously generated plan.
    async fn fetch_plan(&self, profile_id: &ProfileId) -> Result<PlanRecord, BackendError>;
}
