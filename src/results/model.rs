//! Profile and plan records returned by the coaching service.
//!
//! Records are carried through to presentation as received: known fields
//! are typed, anything else the service adds lands in `extra`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque identifier the service assigns to a submitted questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionnaireId(String);

impl QuestionnaireId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuestionnaireId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of a profile; the only input the plan call takes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Six-axis assessment with an archetype label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: ProfileId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questionnaire_id: Option<QuestionnaireId>,
    pub archetype: String,
    pub purpose_clarity: i64,
    pub energy_chronotype: i64,
    pub focus_capacity: i64,
    pub habit_foundation: i64,
    pub mindset_resilience: i64,
    pub skill_trajectory: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A labelled dimension score, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension {
    pub label: &'static str,
    pub score: i64,
}

impl ProfileRecord {
    /// The six dimensions in display order.
    pub fn dimensions(&self) -> [Dimension; 6] {
        [
            Dimension {
                label: "Purpose Clarity",
                score: self.purpose_clarity,
            },
            Dimension {
                label: "Energy & Chronotype",
                score: self.energy_chronotype,
            },
            Dimension {
                label: "Focus Capacity",
                score: self.focus_capacity,
            },
            Dimension {
                label: "Habit Foundation",
                score: self.habit_foundation,
            },
            Dimension {
                label: "Mindset Resilience",
                score: self.mindset_resilience,
            },
            Dimension {
                label: "Skill Trajectory",
                score: self.skill_trajectory,
            },
        ]
    }
}

/// One micro-habit in the habit stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitStackEntry {
    pub habit: String,
    pub cue: String,
    pub time: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A recurring focus block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub name: String,
    pub time: String,
    pub frequency: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Personalized roadmap derived from a profile.
///
/// Template mappings keep the key order the service sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<ProfileId>,
    pub yearly_goal: String,
    pub pillars: Vec<String>,
    pub monthly_focus: String,
    pub weekly_template: Map<String, Value>,
    pub habit_stack: Vec<HabitStackEntry>,
    pub time_blocks: Vec<TimeBlock>,
    pub daily_template: Map<String, Value>,
    pub accountability_steps: Vec<String>,
    pub justification: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Template entries as `(label, activity)` text pairs.
///
/// String values are used as-is; other JSON values are shown in their
/// compact JSON form.
pub fn template_entries(template: &Map<String, Value>) -> Vec<(&str, String)> {
    template
        .iter()
        .map(|(label, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (label.as_str(), text)
        })
        .collect()
}
