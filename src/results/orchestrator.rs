//! ResultsOrchestrator — turns a questionnaire id into a profile and plan
//! through two dependent service calls.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};

use crate::backend::CoachingBackend;
use crate::error::FlowError;

use super::model::{PlanRecord, ProfileRecord, QuestionnaireId};

/// What the results screen shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    /// Waiting for both calls to settle.
    Loading,
    /// Both calls succeeded; records are exactly as the service sent them.
    Ready {
        profile: ProfileRecord,
        plan: PlanRecord,
    },
    /// Either call failed. The cause is only available through
    /// [`ResultsOrchestrator::last_error`] and the logs.
    Error,
}

impl ResultsView {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Runs the profile → plan pipeline and publishes the resulting view.
pub struct ResultsOrchestrator {
    backend: Arc<dyn CoachingBackend>,
    view: watch::Sender<ResultsView>,
    last_error: Option<FlowError>,
}

impl ResultsOrchestrator {
    pub fn new(backend: Arc<dyn CoachingBackend>) -> Self {
        let (view, _rx) = watch::channel(ResultsView::Loading);
        Self {
            backend,
            view,
            last_error: None,
        }
    }

    /// Observe view changes.
    pub fn subscribe(&self) -> watch::Receiver<ResultsView> {
        self.view.subscribe()
    }

    /// Current view.
    pub fn view(&self) -> ResultsView {
        self.view.borrow().clone()
    }

    /// Diagnostic cause of the last `Error` view.
    pub fn last_error(&self) -> Option<&FlowError> {
        self.last_error.as_ref()
    }

    /// Create the profile, then the plan, and publish the outcome.
    ///
    /// No retries and no partial results: any failure yields `Error`.
    pub async fn run(&mut self, questionnaire_id: &QuestionnaireId) -> ResultsView {
        self.last_error = None;
        self.view.send_replace(ResultsView::Loading);

        let view = match self.derive(questionnaire_id).await {
            Ok((profile, plan)) => {
                info!(
                    questionnaire_id = %questionnaire_id,
                    profile_id = %profile.id,
                    archetype = %profile.archetype,
                    "Results ready"
                );
                ResultsView::Ready { profile, plan }
            }
            Err(e) => {
                error!(
                    questionnaire_id = %questionnaire_id,
                    kind = e.kind(),
                    error = %e,
                    "Generating results failed"
                );
                self.last_error = Some(e);
                ResultsView::Error
            }
        };

        self.view.send_replace(view.clone());
        view
    }

    async fn derive(
        &self,
        questionnaire_id: &QuestionnaireId,
    ) -> Result<(ProfileRecord, PlanRecord), FlowError> {
        let profile = self.create_profile(questionnaire_id).await?;
        let plan = self.create_plan(&profile).await?;
        Ok((profile, plan))
    }

    async fn create_profile(
        &self,
        questionnaire_id: &QuestionnaireId,
    ) -> Result<ProfileRecord, FlowError> {
        info!(questionnaire_id = %questionnaire_id, "Creating profile");
        self.backend
            .create_profile(questionnaire_id)
            .await
            .map_err(FlowError::ProfileCreation)
    }

    /// Takes the created profile, not an id: the plan step cannot be reached
    /// without a successful profile step, and its input is the profile's own
    /// id rather than the questionnaire id.
    async fn create_plan(&self, profile: &ProfileRecord) -> Result<PlanRecord, FlowError> {
        info!(profile_id = %profile.id, "Creating plan");
        self.backend
            .create_plan(&profile.id)
            .await
            .map_err(FlowError::PlanCreation)
    }
}
