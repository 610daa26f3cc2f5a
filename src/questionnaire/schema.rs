//! Question catalog — the static definition of every question in the
//! assessment.
//!
//! The catalog is the single source of truth for both the shape of the
//! answer record and the input affordance the presenter shows. Each
//! `QuestionKind` variant maps to exactly one `AnswerShape` through
//! [`QuestionKind::answer_shape`], and to its initial value through
//! `answers::default_value`.

use serde::Serialize;

/// Bounds and default of a single integer slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeSlider {
    /// Wire field name the slider writes to.
    pub field: &'static str,
    /// Label shown next to the slider.
    pub label: &'static str,
    pub min: i64,
    pub max: i64,
    pub step: i64,
    /// Initial value before the user touches the slider.
    pub default: i64,
}

/// Input kind of a question, with its kind-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionKind {
    FreeText,
    SingleChoice {
        options: &'static [&'static str],
    },
    MultiChoice {
        options: &'static [&'static str],
    },
    /// Two independent sliders, each serialized as its own field.
    DualRange {
        first: RangeSlider,
        second: RangeSlider,
    },
    /// Exactly three free-text slots.
    TripleText,
    RatingScale {
        scale: RangeSlider,
    },
}

/// Shape of the value a question's answer must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerShape {
    Text,
    TextSet,
    IntegerPair,
    TextTriple,
    Integer,
}

impl std::fmt::Display for AnswerShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Text => "text",
            Self::TextSet => "set of text",
            Self::IntegerPair => "integer pair",
            Self::TextTriple => "text triple",
            Self::Integer => "integer",
        };
        write!(f, "{s}")
    }
}

impl QuestionKind {
    /// The answer shape this kind accepts.
    pub fn answer_shape(&self) -> AnswerShape {
        match self {
            Self::FreeText | Self::SingleChoice { .. } => AnswerShape::Text,
            Self::MultiChoice { .. } => AnswerShape::TextSet,
            Self::DualRange { .. } => AnswerShape::IntegerPair,
            Self::TripleText => AnswerShape::TextTriple,
            Self::RatingScale { .. } => AnswerShape::Integer,
        }
    }

    /// Options offered by choice kinds; empty for everything else.
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Self::SingleChoice { options } | Self::MultiChoice { options } => options,
            _ => &[],
        }
    }

    /// Snake-case name of the kind, as used on the wire and in errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FreeText => "free_text",
            Self::SingleChoice { .. } => "single_choice",
            Self::MultiChoice { .. } => "multi_choice",
            Self::DualRange { .. } => "dual_range",
            Self::TripleText => "triple_text",
            Self::RatingScale { .. } => "rating_scale",
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionDefinition {
    /// Stable key, unique across the catalog. Also the answer-record field
    /// name, except for dual ranges which write their sliders' fields.
    pub id: &'static str,
    pub prompt: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// Ordered, read-only question catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionSchema {
    questions: &'static [QuestionDefinition],
}

impl QuestionSchema {
    /// Wrap a static catalog.
    pub const fn new(questions: &'static [QuestionDefinition]) -> Self {
        Self { questions }
    }

    /// The 12-question self-assessment.
    pub const fn standard() -> Self {
        Self::new(STANDARD_QUESTIONS)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &'static [QuestionDefinition] {
        self.questions
    }

    /// Question at a catalog position.
    pub fn get(&self, index: usize) -> Option<&'static QuestionDefinition> {
        self.questions.get(index)
    }

    /// Position of a question id in the catalog.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    /// Question by id.
    pub fn by_id(&self, id: &str) -> Option<&'static QuestionDefinition> {
        self.questions.iter().find(|q| q.id == id)
    }
}

impl Default for QuestionSchema {
    fn default() -> Self {
        Self::standard()
    }
}

pub const SKILL_OPTIONS: &[&str] = &[
    "Writing",
    "Design",
    "Programming",
    "Teaching",
    "Leadership",
    "Analysis",
    "Creative",
    "Technical",
    "Communication",
    "Strategy",
];

pub const CHRONOTYPE_OPTIONS: &[&str] =
    &["Early morning", "Late morning", "Afternoon", "Evening", "Night"];

pub const HABIT_COUNT_OPTIONS: &[&str] = &["0", "1-2", "3-4", "5+"];

pub const SETBACK_OPTIONS: &[&str] = &[
    "give up",
    "try again same way",
    "adjust approach and try again",
    "learn and iterate immediately",
];

pub const DISTRACTION_OPTIONS: &[&str] = &[
    "Social media",
    "Meetings",
    "Noise",
    "Multitasking",
    "Email",
    "Phone notifications",
    "Web browsing",
    "TV/streaming",
];

const STANDARD_QUESTIONS: &[QuestionDefinition] = &[
    QuestionDefinition {
        id: "energizing_activities",
        prompt: "What activities make you feel energized and absorbed for hours?",
        placeholder: Some("Describe activities where you lose track of time..."),
        kind: QuestionKind::FreeText,
    },
    QuestionDefinition {
        id: "passionate_problems",
        prompt: "What problems are you passionate about solving?",
        placeholder: Some("What issues or challenges do you care deeply about?"),
        kind: QuestionKind::FreeText,
    },
    QuestionDefinition {
        id: "existing_skills",
        prompt: "What skills do you already have that you'd like to use or build?",
        placeholder: None,
        kind: QuestionKind::MultiChoice {
            options: SKILL_OPTIONS,
        },
    },
    QuestionDefinition {
        id: "time_availability",
        prompt: "How many hours can you realistically devote to focused work?",
        placeholder: None,
        kind: QuestionKind::DualRange {
            first: RangeSlider {
                field: "weekday_hours",
                label: "Weekday hours",
                min: 0,
                max: 12,
                step: 1,
                default: 2,
            },
            second: RangeSlider {
                field: "weekend_hours",
                label: "Weekend hours",
                min: 0,
                max: 16,
                step: 1,
                default: 4,
            },
        },
    },
    QuestionDefinition {
        id: "chronotype",
        prompt: "When are you naturally most alert?",
        placeholder: None,
        kind: QuestionKind::SingleChoice {
            options: CHRONOTYPE_OPTIONS,
        },
    },
    QuestionDefinition {
        id: "morning_routine",
        prompt: "Do you currently do a morning routine?",
        placeholder: Some("Describe your morning routine or write \"No\" if you don't have one..."),
        kind: QuestionKind::FreeText,
    },
    QuestionDefinition {
        id: "reliable_habits",
        prompt: "How many existing daily habits do you reliably keep?",
        placeholder: None,
        kind: QuestionKind::SingleChoice {
            options: HABIT_COUNT_OPTIONS,
        },
    },
    QuestionDefinition {
        id: "setback_reaction",
        prompt: "How do you react to setbacks?",
        placeholder: None,
        kind: QuestionKind::SingleChoice {
            options: SETBACK_OPTIONS,
        },
    },
    QuestionDefinition {
        id: "yearly_goals",
        prompt: "What are 3 outcomes you want to achieve in 12 months?",
        placeholder: None,
        kind: QuestionKind::TripleText,
    },
    QuestionDefinition {
        id: "key_habit_change",
        prompt: "What single habit change would make the largest difference?",
        placeholder: Some("Describe the one habit that would transform your productivity..."),
        kind: QuestionKind::FreeText,
    },
    QuestionDefinition {
        id: "main_distractions",
        prompt: "What distractions are your biggest time sinks?",
        placeholder: None,
        kind: QuestionKind::MultiChoice {
            options: DISTRACTION_OPTIONS,
        },
    },
    QuestionDefinition {
        id: "commitment_level",
        prompt: "On a scale 1–10, how committed are you to following a new plan?",
        placeholder: None,
        kind: QuestionKind::RatingScale {
            scale: RangeSlider {
                field: "commitment_level",
                label: "Commitment",
                min: 1,
                max: 10,
                step: 1,
                default: 7,
            },
        },
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn standard_catalog_order_and_kinds() {
        let schema = QuestionSchema::standard();
        let layout: Vec<(&str, &str)> = schema
            .questions()
            .iter()
            .map(|q| (q.id, q.kind.name()))
            .collect();
        assert_eq!(
            layout,
            vec![
                ("energizing_activities", "free_text"),
                ("passionate_problems", "free_text"),
                ("existing_skills", "multi_choice"),
                ("time_availability", "dual_range"),
                ("chronotype", "single_choice"),
                ("morning_routine", "free_text"),
                ("reliable_habits", "single_choice"),
                ("setback_reaction", "single_choice"),
                ("yearly_goals", "triple_text"),
                ("key_habit_change", "free_text"),
                ("main_distractions", "multi_choice"),
                ("commitment_level", "rating_scale"),
            ]
        );
    }

    #[test]
    fn ids_are_unique() {
        let schema = QuestionSchema::standard();
        let ids: HashSet<&str> = schema.questions().iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), schema.len());
    }

    #[test]
    fn option_counts_match_catalog() {
        let schema = QuestionSchema::standard();
        let count = |id: &str| schema.by_id(id).unwrap().kind.options().len();
        assert_eq!(count("existing_skills"), 10);
        assert_eq!(count("chronotype"), 5);
        assert_eq!(count("reliable_habits"), 4);
        assert_eq!(count("setback_reaction"), 4);
        assert_eq!(count("main_distractions"), 8);
        assert_eq!(count("energizing_activities"), 0);
    }

    #[test]
    fn slider_bounds() {
        let schema = QuestionSchema::standard();
        match schema.by_id("time_availability").unwrap().kind {
            QuestionKind::DualRange { first, second } => {
                assert_eq!((first.field, first.min, first.max), ("weekday_hours", 0, 12));
                assert_eq!((second.field, second.min, second.max), ("weekend_hours", 0, 16));
            }
            other => panic!("unexpected kind {other:?}"),
        }
        match schema.by_id("commitment_level").unwrap().kind {
            QuestionKind::RatingScale { scale } => {
                assert_eq!((scale.min, scale.max, scale.default), (1, 10, 7));
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn lookup_by_index_and_id_agree() {
        let schema = QuestionSchema::standard();
        for (i, q) in schema.questions().iter().enumerate() {
            assert_eq!(schema.position(q.id), Some(i));
            assert_eq!(schema.get(i).map(|d| d.id), Some(q.id));
        }
        assert!(schema.get(schema.len()).is_none());
        assert!(schema.by_id("nope").is_none());
    }

    #[test]
    fn definition_serializes_with_kind_tag() {
        let schema = QuestionSchema::standard();
        let json = serde_json::to_value(schema.by_id("chronotype").unwrap()).unwrap();
        assert_eq!(json["kind"], "single_choice");
        assert_eq!(json["options"][0], "Early morning");
        assert!(json.get("placeholder").is_none());
    }
}
