//! In-process `CoachingBackend` for unit tests: counts calls, records
//! requests, and fails or hangs on demand.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::BackendError;
use crate::questionnaire::AnswerRecord;
use crate::results::{PlanRecord, ProfileId, ProfileRecord, QuestionnaireId};

use super::traits::CoachingBackend;

#[derive(Default)]
pub(crate) struct StubBackend {
    pub submissions: AtomicUsize,
    pub profile_calls: AtomicUsize,
    pub plan_calls: AtomicUsize,
    pub fail_submit: bool,
    pub fail_profile: bool,
    pub fail_plan: bool,
    pub hang_submit: bool,
    pub submitted: Mutex<Option<Value>>,
    pub profile_requested_for: Mutex<Option<QuestionnaireId>>,
    pub plan_requested_for: Mutex<Option<ProfileId>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_submit() -> Self {
        Self {
            fail_submit: true,
            ..Self::default()
        }
    }

    pub fn hanging_submit() -> Self {
        Self {
            hang_submit: true,
            ..Self::default()
        }
    }

    pub fn failing_profile() -> Self {
        Self {
            fail_profile: true,
            ..Self::default()
        }
    }

    pub fn failing_plan() -> Self {
        Self {
            fail_plan: true,
            ..Self::default()
        }
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

fn server_error(operation: &str) -> BackendError {
    BackendError::Status {
        operation: operation.to_string(),
        status: 500,
        body: "stub failure".to_string(),
    }
}

pub(crate) fn sample_profile_json() -> Value {
    json!({
        "id": "prof-42",
        "questionnaire_id": "q-42",
        "purpose_clarity": 85,
        "energy_chronotype": 100,
        "focus_capacity": 65,
        "habit_foundation": 80,
        "mindset_resilience": 100,
        "skill_trajectory": 60,
        "archetype": "Purpose-driven Achiever",
        "created_at": "2025-09-06T10:15:00+00:00"
    })
}

pub(crate) fn sample_plan_json() -> Value {
    json!({
        "id": "plan-7",
        "profile_id": "prof-42",
        "yearly_goal": "Launch an online course",
        "pillars": ["Skill Development", "Habit Formation", "Focus Optimization"],
        "monthly_focus": "Building Foundation",
        "weekly_template": {
            "Monday": "Deep work session",
            "Tuesday": "Skill practice",
            "Sunday": "Planning and reflection"
        },
        "daily_template": {
            "morning": "Routine + Planning",
            "evening": "Reflection + Preparation"
        },
        "habit_stack": [
            {"habit": "Morning planning", "cue": "After coffee", "time": "5 minutes"}
        ],
        "time_blocks": [
            {"name": "Deep Work", "time": "Early morning - 90 minutes", "frequency": "Daily"}
        ],
        "accountability_steps": ["Weekly review of goals"],
        "justification": "Plan tailored for an early riser."
    })
}

pub(crate) fn sample_profile() -> ProfileRecord {
    serde_json::from_value(sample_profile_json()).expect("sample profile parses")
}

pub(crate) fn sample_plan() -> PlanRecord {
    serde_json::from_value(sample_plan_json()).expect("sample plan parses")
}

#[async_trait]
impl CoachingBackend for StubBackend {
    async fn submit_questionnaire(
        &self,
        answers: &AnswerRecord,
    ) -> Result<QuestionnaireId, BackendError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        *self.submitted.lock().unwrap() = serde_json::to_value(answers).ok();
        if self.hang_submit {
            std::future::pending::<()>().await;
        }
        if self.fail_submit {
            return Err(server_error("submit_questionnaire"));
        }
        Ok(QuestionnaireId::new("q-42"))
    }

    async fn create_profile(
        &self,
        questionnaire_id: &QuestionnaireId,
    ) -> Result<ProfileRecord, BackendError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        *self.profile_requested_for.lock().unwrap() = Some(questionnaire_id.clone());
        if self.fail_profile {
            return Err(server_error("create_profile"));
        }
        Ok(sample_profile())
    }

    async fn create_plan(&self, profile_id: &ProfileId) -> Result<PlanRecord, BackendError> {
        self.plan_calls.fetch_add(1, Ordering::SeqCst);
        *self.plan_requested_for.lock().unwrap() = Some(profile_id.clone());
        if self.fail_plan {
            return Err(server_error("create_plan"));
        }
        Ok(sample_plan())
    }

    async fn fetch_plan(&self, profile_id: &ProfileId) -> Result<PlanRecord, BackendError> {
        self.create_plan(profile_id).await
    }
}
