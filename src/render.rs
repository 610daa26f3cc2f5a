//! Plain-text rendering of questions and results for the terminal driver.

use crate::questionnaire::{AnswerValue, QuestionDefinition, QuestionKind};
use crate::results::model::template_entries;
use crate::results::{PlanRecord, ProfileRecord, ResultsView};

/// Message shown when results could not be produced.
pub const GENERIC_FAILURE: &str =
    "We couldn't generate your results. Please try again.";

/// Render the active question with its progress header and current answer.
pub fn render_question(
    question: &QuestionDefinition,
    answer: Option<&AnswerValue>,
    step: usize,
    total: usize,
    progress: f64,
) -> String {
    let mut parts = vec![
        format!(
            "── Question {} of {} ({:.0}%) ──",
            step + 1,
            total,
            progress * 100.0
        ),
        question.prompt.to_string(),
    ];

    if let Some(placeholder) = question.placeholder {
        parts.push(format!("  ({placeholder})"));
    }

    match &question.kind {
        QuestionKind::SingleChoice { options } | QuestionKind::MultiChoice { options } => {
            for (i, option) in options.iter().enumerate() {
                parts.push(format!("  {}. {}", i + 1, option));
            }
        }
        QuestionKind::DualRange { first, second } => {
            parts.push(format!("  {}: {}–{}", first.label, first.min, first.max));
            parts.push(format!("  {}: {}–{}", second.label, second.min, second.max));
        }
        QuestionKind::RatingScale { scale } => {
            parts.push(format!("  {}–{}", scale.min, scale.max));
        }
        QuestionKind::FreeText | QuestionKind::TripleText => {}
    }

    if let Some(answer) = answer {
        parts.push(format!("Current answer: {}", describe_answer(answer)));
    }

    parts.join("\n")
}

/// One-line summary of an answer.
pub fn describe_answer(answer: &AnswerValue) -> String {
    match answer {
        AnswerValue::Text(s) if s.is_empty() => "(none)".to_string(),
        AnswerValue::Text(s) => s.clone(),
        AnswerValue::TextSet(set) if set.is_empty() => "(none)".to_string(),
        AnswerValue::TextSet(set) => set.join(", "),
        AnswerValue::IntegerPair(a, b) => format!("{a} / {b}"),
        AnswerValue::TextTriple(slots) => slots
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}) {}", i + 1, if s.is_empty() { "-" } else { s.as_str() }))
            .collect::<Vec<_>>()
            .join("  "),
        AnswerValue::Integer(n) => n.to_string(),
    }
}

/// Render the results screen for a view.
pub fn render_results(view: &ResultsView) -> String {
    match view {
        ResultsView::Loading => "Analyzing your responses and building your plan...".to_string(),
        ResultsView::Error => GENERIC_FAILURE.to_string(),
        ResultsView::Ready { profile, plan } => {
            format!("{}\n\n{}", render_profile(profile), render_plan(plan))
        }
    }
}

pub fn render_profile(profile: &ProfileRecord) -> String {
    let mut parts = vec![
        "# Your Productivity Profile".to_string(),
        format!("Archetype: {}", profile.archetype),
    ];
    for dim in profile.dimensions() {
        parts.push(format!("- {}: {}/100", dim.label, dim.score));
    }
    parts.join("\n")
}

pub fn render_plan(plan: &PlanRecord) -> String {
    let mut parts = vec![
        "# Your Personalized Plan".to_string(),
        format!("Yearly goal: {}", plan.yearly_goal),
    ];

    if !plan.pillars.is_empty() {
        parts.push("\n## Pillars".to_string());
        for (i, pillar) in plan.pillars.iter().enumerate() {
            parts.push(format!("{}. {}", i + 1, pillar));
        }
    }

    parts.push(format!("\n## Monthly focus\n{}", plan.monthly_focus));

    parts.push("\n## Weekly template".to_string());
    for (day, activity) in template_entries(&plan.weekly_template) {
        parts.push(format!("- {day}: {activity}"));
    }

    parts.push("\n## Habit stack".to_string());
    for habit in &plan.habit_stack {
        parts.push(format!(
            "- {} — Cue: {} • Time: {}",
            habit.habit, habit.cue, habit.time
        ));
    }

    parts.push("\n## Time blocks".to_string());
    for block in &plan.time_blocks {
        parts.push(format!("- {}: {} ({})", block.name, block.time, block.frequency));
    }

    parts.push("\n## Daily template".to_string());
    for (period, activity) in template_entries(&plan.daily_template) {
        parts.push(format!("- {period}: {activity}"));
    }

    parts.push("\n## Accountability".to_string());
    for (i, step) in plan.accountability_steps.iter().enumerate() {
        parts.push(format!("{}. {}", i + 1, step));
    }

    parts.push(format!("\n## Why this plan\n{}", plan.justification));

    parts.join("\n")
}
