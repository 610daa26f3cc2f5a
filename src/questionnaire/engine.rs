//! QuestionnaireEngine — owns one session's answers and step cursor, and
//! submits the record when the last step is advanced past.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::backend::CoachingBackend;
use crate::error::{FlowError, QuestionnaireError};
use crate::results::QuestionnaireId;

use super::answers::{AnswerRecord, AnswerValue, RangePart};
use super::schema::{QuestionDefinition, QuestionSchema};
use super::state::{SessionPhase, StepCursor};

/// Result of an `advance()` call.
#[derive(Debug, Clone)]
pub enum AdvanceOutcome {
    /// Moved to the given step.
    Continuing { step: usize },
    /// The record was accepted.
    Completed { questionnaire_id: QuestionnaireId },
    /// Submission failed. The session is terminal.
    Failed { error: FlowError },
    /// A submission is already outstanding; nothing was sent.
    InFlight,
}

/// Drives one questionnaire session.
pub struct QuestionnaireEngine {
    schema: QuestionSchema,
    backend: Arc<dyn CoachingBackend>,
    cursor: StepCursor,
    phase: SessionPhase,
    answers: AnswerRecord,
    questionnaire_id: Option<QuestionnaireId>,
    failure: Option<FlowError>,
}

impl QuestionnaireEngine {
    pub fn new(schema: QuestionSchema, backend: Arc<dyn CoachingBackend>) -> Self {
        Self {
            schema,
            backend,
            cursor: StepCursor::new(schema.len()),
            phase: SessionPhase::InProgress,
            answers: AnswerRecord::new(schema),
            questionnaire_id: None,
            failure: None,
        }
    }

    /// Engine over the standard 12-question catalog.
    pub fn standard(backend: Arc<dyn CoachingBackend>) -> Self {
        Self::new(QuestionSchema::standard(), backend)
    }

    /// Start over: first step, default answers.
    pub fn reset(&mut self) {
        self.cursor = StepCursor::new(self.schema.len());
        self.phase = SessionPhase::InProgress;
        self.answers = AnswerRecord::new(self.schema);
        self.questionnaire_id = None;
        self.failure = None;
        debug!("Questionnaire session reset");
    }

    pub fn schema(&self) -> QuestionSchema {
        self.schema
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current_step(&self) -> usize {
        self.cursor.index()
    }

    pub fn total_steps(&self) -> usize {
        self.cursor.len()
    }

    pub fn is_first_step(&self) -> bool {
        self.cursor.is_first()
    }

    pub fn is_last_step(&self) -> bool {
        self.cursor.is_last()
    }

    /// Identifier assigned by the service, once completed.
    pub fn questionnaire_id(&self) -> Option<&QuestionnaireId> {
        self.questionnaire_id.as_ref()
    }

    /// Cause of a failed submission.
    pub fn failure(&self) -> Option<&FlowError> {
        self.failure.as_ref()
    }

    /// The answer record. `None` once the service has accepted it.
    pub fn answers(&self) -> Option<&AnswerRecord> {
        match self.phase {
            SessionPhase::Completed => None,
            _ => Some(&self.answers),
        }
    }

    /// The question under the cursor.
    pub fn current_question(&self) -> Result<&'static QuestionDefinition, QuestionnaireError> {
        self.schema
            .get(self.cursor.index())
            .ok_or(QuestionnaireError::StepOutOfBounds {
                step: self.cursor.index(),
                len: self.schema.len(),
            })
    }

    /// `(step + 1) / total`, for display.
    pub fn progress_fraction(&self) -> f64 {
        self.cursor.fraction()
    }

    /// Step back one question. No-op on the first step or outside
    /// `in_progress`; returns whether the cursor moved.
    pub fn retreat(&mut self) -> bool {
        if self.phase != SessionPhase::InProgress {
            return false;
        }
        let moved = self.cursor.back();
        if moved {
            debug!(step = self.cursor.index(), "Questionnaire step back");
        }
        moved
    }

    /// Move to the next question, or submit the record from the last one.
    ///
    /// Exactly one submission is issued per session: while it is
    /// outstanding this returns `InFlight`, and once it has settled the
    /// terminal outcome is reported again without another call.
    pub async fn advance(&mut self) -> AdvanceOutcome {
        match self.phase {
            SessionPhase::InProgress => {}
            SessionPhase::Submitting => return AdvanceOutcome::InFlight,
            SessionPhase::Completed | SessionPhase::Failed => return self.terminal_outcome(),
        }

        if self.cursor.forward() {
            debug!(step = self.cursor.index(), "Questionnaire step forward");
            return AdvanceOutcome::Continuing {
                step: self.cursor.index(),
            };
        }

        self.submit().await
    }

    async fn submit(&mut self) -> AdvanceOutcome {
        self.transition(SessionPhase::Submitting);
        info!(questions = self.schema.len(), "Submitting questionnaire");

        let backend = Arc::clone(&self.backend);
        match backend.submit_questionnaire(&self.answers).await {
            Ok(questionnaire_id) => {
                info!(questionnaire_id = %questionnaire_id, "Questionnaire submitted");
                self.transition(SessionPhase::Completed);
                // The service-assigned id is the only surviving reference.
                self.answers = AnswerRecord::new(self.schema);
                self.questionnaire_id = Some(questionnaire_id.clone());
                AdvanceOutcome::Completed { questionnaire_id }
            }
            Err(e) => {
                let error = FlowError::Submission(e);
                error!(kind = error.kind(), error = %error, "Questionnaire submission failed");
                self.transition(SessionPhase::Failed);
                self.failure = Some(error.clone());
                AdvanceOutcome::Failed { error }
            }
        }
    }

    fn terminal_outcome(&self) -> AdvanceOutcome {
        match (&self.questionnaire_id, &self.failure) {
            (Some(id), _) => AdvanceOutcome::Completed {
                questionnaire_id: id.clone(),
            },
            (None, Some(error)) => AdvanceOutcome::Failed {
                error: error.clone(),
            },
            (None, None) => AdvanceOutcome::InFlight,
        }
    }

    fn transition(&mut self, target: SessionPhase) {
        if !self.phase.can_transition_to(target) {
            warn!(from = %self.phase, to = %target, "Unexpected questionnaire phase transition");
        }
        self.phase = target;
    }

    fn ensure_editable(&self) -> Result<(), QuestionnaireError> {
        if self.phase == SessionPhase::InProgress {
            Ok(())
        } else {
            Err(QuestionnaireError::NotEditable { phase: self.phase })
        }
    }

    /// Overwrite the answer for a question. The value must have the
    /// question kind's shape.
    pub fn set_answer(
        &mut self,
        question_id: &str,
        value: AnswerValue,
    ) -> Result<(), QuestionnaireError> {
        self.ensure_editable()?;
        self.answers.set(question_id, value)
    }

    /// Select or deselect one option of a multi-choice question.
    pub fn toggle_choice(
        &mut self,
        question_id: &str,
        option: &str,
        selected: bool,
    ) -> Result<(), QuestionnaireError> {
        self.ensure_editable()?;
        self.answers.toggle_choice(question_id, option, selected)
    }

    /// Set one slider of a dual-range question.
    pub fn set_range_part(
        &mut self,
        question_id: &str,
        part: RangePart,
        value: i64,
    ) -> Result<(), QuestionnaireError> {
        self.ensure_editable()?;
        self.answers.set_range_part(question_id, part, value)
    }

    /// Set one slot of a triple-text question.
    pub fn set_goal_slot(
        &mut self,
        question_id: &str,
        slot: usize,
        text: impl Into<String>,
    ) -> Result<(), QuestionnaireError> {
        self.ensure_editable()?;
        self.answers.set_text_slot(question_id, slot, text)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::backend::stub::StubBackend;

    fn engine_with(stub: &Arc<StubBackend>) -> QuestionnaireEngine {
        QuestionnaireEngine::standard(stub.clone() as Arc<dyn CoachingBackend>)
    }

    async fn walk_to_last(engine: &mut QuestionnaireEngine) {
        while !engine.is_last_step() {
            assert!(matches!(engine.advance().await, AdvanceOutcome::Continuing { .. }));
        }
    }

    fn answer_everything(engine: &mut QuestionnaireEngine) {
        engine
            .set_answer("energizing_activities", AnswerValue::text("coding and designing apps"))
            .unwrap();
        engine
            .set_answer(
                "passionate_problems",
                AnswerValue::text("help students learn better through technology"),
            )
            .unwrap();
        for skill in ["Programming", "Design", "Teaching"] {
            engine.toggle_choice("existing_skills", skill, true).unwrap();
        }
        engine
            .set_answer("time_availability", AnswerValue::IntegerPair(4, 6))
            .unwrap();
        engine
            .set_answer("chronotype", AnswerValue::text("Early morning"))
            .unwrap();
        engine
            .set_answer("morning_routine", AnswerValue::text("Coffee, meditation, planning"))
            .unwrap();
        engine
            .set_answer("reliable_habits", AnswerValue::text("3-4"))
            .unwrap();
        engine
            .set_answer(
                "setback_reaction",
                AnswerValue::text("learn and iterate immediately"),
            )
            .unwrap();
        engine
            .set_answer(
                "yearly_goals",
                AnswerValue::triple("Launch online course", "Build learning app", "Grow audience"),
            )
            .unwrap();
        engine
            .set_answer(
                "key_habit_change",
                AnswerValue::text("Start deep work sessions every morning"),
            )
            .unwrap();
        engine
            .set_answer(
                "main_distractions",
                AnswerValue::set(["Social media", "Email", "Phone notifications"]),
            )
            .unwrap();
        engine
            .set_answer("commitment_level", AnswerValue::Integer(8))
            .unwrap();
    }

    #[tokio::test]
    async fn starts_in_progress_at_step_zero() {
        let stub = Arc::new(StubBackend::new());
        let engine = engine_with(&stub);
        assert_eq!(engine.phase(), SessionPhase::InProgress);
        assert_eq!(engine.current_step(), 0);
        assert_eq!(engine.total_steps(), 12);
        assert_eq!(engine.current_question().unwrap().id, "energizing_activities");

        let json = serde_json::to_value(engine.answers().unwrap()).unwrap();
        assert_eq!(json["weekday_hours"], 2);
        assert_eq!(json["weekend_hours"], 4);
        assert_eq!(json["commitment_level"], 7);
    }

    #[tokio::test]
    async fn retreat_from_first_step_is_noop() {
        let stub = Arc::new(StubBackend::new());
        let mut engine = engine_with(&stub);
        assert!(!engine.retreat());
        assert_eq!(engine.current_step(), 0);
        assert_eq!(engine.phase(), SessionPhase::InProgress);
    }

    #[tokio::test]
    async fn progress_fraction_tracks_every_step() {
        let stub = Arc::new(StubBackend::new());
        let mut engine = engine_with(&stub);
        let n = engine.total_steps();
        for k in 0..n {
            assert_eq!(engine.current_step(), k);
            assert_eq!(engine.progress_fraction(), (k + 1) as f64 / n as f64);
            if k + 1 < n {
                engine.advance().await;
            }
        }
        assert_eq!(engine.progress_fraction(), 1.0);
        assert_eq!(StubBackend::count(&stub.submissions), 0);
    }

    #[tokio::test]
    async fn advance_and_retreat_move_the_cursor() {
        let stub = Arc::new(StubBackend::new());
        let mut engine = engine_with(&stub);
        assert!(matches!(
            engine.advance().await,
            AdvanceOutcome::Continuing { step: 1 }
        ));
        engine.advance().await;
        assert_eq!(engine.current_question().unwrap().id, "existing_skills");
        assert!(engine.retreat());
        assert_eq!(engine.current_step(), 1);
        assert!(!engine.is_first_step());
    }

    #[tokio::test]
    async fn completing_submits_all_fields_once() {
        let stub = Arc::new(StubBackend::new());
        let mut engine = engine_with(&stub);
        answer_everything(&mut engine);
        walk_to_last(&mut engine).await;
        assert_eq!(StubBackend::count(&stub.submissions), 0);

        let outcome = engine.advance().await;
        match outcome {
            AdvanceOutcome::Completed { questionnaire_id } => {
                assert_eq!(questionnaire_id.as_str(), "q-42")
            }
            other => panic!("expected Completed, got {other:?}"),
        }
        assert_eq!(StubBackend::count(&stub.submissions), 1);
        assert_eq!(engine.phase(), SessionPhase::Completed);
        assert_eq!(engine.questionnaire_id().map(|id| id.as_str()), Some("q-42"));

        let submitted = stub.submitted.lock().unwrap().clone().unwrap();
        let body = submitted.as_object().unwrap();
        assert_eq!(body.len(), 13);
        assert_eq!(body["weekday_hours"], 4);
        assert_eq!(body["weekend_hours"], 6);
        assert_eq!(body["existing_skills"], serde_json::json!(["Programming", "Design", "Teaching"]));
        assert_eq!(body["commitment_level"], 8);
        for question in QuestionSchema::standard().questions() {
            if question.id != "time_availability" {
                assert!(body.contains_key(question.id), "missing {}", question.id);
            }
        }
    }

    #[tokio::test]
    async fn record_is_dropped_after_success() {
        let stub = Arc::new(StubBackend::new());
        let mut engine = engine_with(&stub);
        walk_to_last(&mut engine).await;
        engine.advance().await;
        assert!(engine.answers().is_none());
        assert_eq!(
            engine.set_answer("chronotype", AnswerValue::text("Night")),
            Err(QuestionnaireError::NotEditable {
                phase: SessionPhase::Completed
            })
        );
    }

    #[tokio::test]
    async fn advancing_a_completed_session_does_not_resubmit() {
        let stub = Arc::new(StubBackend::new());
        let mut engine = engine_with(&stub);
        walk_to_last(&mut engine).await;
        engine.advance().await;
        for _ in 0..3 {
            assert!(matches!(
                engine.advance().await,
                AdvanceOutcome::Completed { .. }
            ));
        }
        assert_eq!(StubBackend::count(&stub.submissions), 1);
    }

    #[tokio::test]
    async fn submission_failure_is_terminal() {
        let stub = Arc::new(StubBackend::failing_submit());
        let mut engine = engine_with(&stub);
        engine.set_answer("chronotype", AnswerValue::text("Night")).unwrap();
        walk_to_last(&mut engine).await;

        match engine.advance().await {
            AdvanceOutcome::Failed { error } => assert_eq!(error.kind(), "submission"),
            other => panic!("expected Failed, got {other:?}"),
        }
        assert_eq!(engine.phase(), SessionPhase::Failed);
        assert!(engine.failure().is_some());
        assert!(!engine.retreat());

        // Frozen record stays readable; no automatic retry.
        assert_eq!(
            engine.answers().unwrap().get("chronotype"),
            Some(&AnswerValue::text("Night"))
        );
        assert!(matches!(engine.advance().await, AdvanceOutcome::Failed { .. }));
        assert_eq!(StubBackend::count(&stub.submissions), 1);
    }

    #[tokio::test]
    async fn advance_while_submitting_sends_nothing() {
        let stub = Arc::new(StubBackend::hanging_submit());
        let mut engine = engine_with(&stub);
        walk_to_last(&mut engine).await;

        let first = tokio::time::timeout(Duration::from_millis(50), engine.advance()).await;
        assert!(first.is_err(), "hanging submission should not settle");
        assert_eq!(engine.phase(), SessionPhase::Submitting);

        for _ in 0..3 {
            assert!(matches!(engine.advance().await, AdvanceOutcome::InFlight));
        }
        assert!(!engine.retreat());
        assert!(engine.set_answer("chronotype", AnswerValue::text("Night")).is_err());
        assert_eq!(StubBackend::count(&stub.submissions), 1);
    }

    #[tokio::test]
    async fn reset_starts_a_fresh_session() {
        let stub = Arc::new(StubBackend::new());
        let mut engine = engine_with(&stub);
        engine.set_answer("chronotype", AnswerValue::text("Night")).unwrap();
        walk_to_last(&mut engine).await;
        engine.advance().await;

        engine.reset();
        assert_eq!(engine.phase(), SessionPhase::InProgress);
        assert_eq!(engine.current_step(), 0);
        assert!(engine.questionnaire_id().is_none());
        assert_eq!(
            engine.answers().unwrap().get("chronotype"),
            Some(&AnswerValue::text(""))
        );
    }

    #[tokio::test]
    async fn setters_enforce_shape() {
        let stub = Arc::new(StubBackend::new());
        let mut engine = engine_with(&stub);
        assert!(matches!(
            engine.set_answer("existing_skills", AnswerValue::text("Writing")),
            Err(QuestionnaireError::ShapeMismatch { .. })
        ));
        engine
            .set_range_part("time_availability", RangePart::First, 9)
            .unwrap();
        engine.set_goal_slot("yearly_goals", 2, "Run a marathon").unwrap();
        let answers = engine.answers().unwrap();
        assert_eq!(answers.get("time_availability"), Some(&AnswerValue::IntegerPair(9, 4)));
        assert_eq!(
            answers.get("yearly_goals"),
            Some(&AnswerValue::triple("", "", "Run a marathon"))
        );
    }
}
