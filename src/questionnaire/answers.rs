//! Answer record — one value per catalog question, shaped by the
//! question's kind.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::QuestionnaireError;

use super::schema::{AnswerShape, QuestionDefinition, QuestionKind, QuestionSchema};

/// A single answer value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    /// Free text or the selected option of a single choice.
    Text(String),
    /// Selected options of a multi choice, without duplicates, in the
    /// order they were first selected.
    TextSet(Vec<String>),
    /// Both sliders of a dual range.
    IntegerPair(i64, i64),
    TextTriple([String; 3]),
    Integer(i64),
}

impl AnswerValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Build a set answer. Repeated options collapse onto their first
    /// occurrence.
    pub fn set<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selected: Vec<String> = Vec::new();
        for option in options {
            let option = option.into();
            if !selected.contains(&option) {
                selected.push(option);
            }
        }
        Self::TextSet(selected)
    }

    pub fn triple(a: impl Into<String>, b: impl Into<String>, c: impl Into<String>) -> Self {
        Self::TextTriple([a.into(), b.into(), c.into()])
    }

    pub fn shape(&self) -> AnswerShape {
        match self {
            Self::Text(_) => AnswerShape::Text,
            Self::TextSet(_) => AnswerShape::TextSet,
            Self::IntegerPair(..) => AnswerShape::IntegerPair,
            Self::TextTriple(_) => AnswerShape::TextTriple,
            Self::Integer(_) => AnswerShape::Integer,
        }
    }

    /// Remove duplicate set members, keeping first occurrences.
    fn normalized(self) -> Self {
        match self {
            Self::TextSet(options) => Self::set(options),
            other => other,
        }
    }
}

/// Initial value for a question of the given kind.
pub fn default_value(kind: &QuestionKind) -> AnswerValue {
    match kind {
        QuestionKind::FreeText | QuestionKind::SingleChoice { .. } => {
            AnswerValue::Text(String::new())
        }
        QuestionKind::MultiChoice { .. } => AnswerValue::TextSet(Vec::new()),
        QuestionKind::DualRange { first, second } => {
            AnswerValue::IntegerPair(first.default, second.default)
        }
        QuestionKind::TripleText => AnswerValue::TextTriple(Default::default()),
        QuestionKind::RatingScale { scale } => AnswerValue::Integer(scale.default),
    }
}

/// Which slider of a dual range to update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePart {
    First,
    Second,
}

/// The evolving set of answers for one questionnaire session.
///
/// Always holds a value for every question in its schema; values are
/// replaced in place and never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    schema: QuestionSchema,
    values: Vec<AnswerValue>,
}

impl AnswerRecord {
    /// A record holding the default value of every question.
    pub fn new(schema: QuestionSchema) -> Self {
        let values = schema
            .questions()
            .iter()
            .map(|q| default_value(&q.kind))
            .collect();
        Self { schema, values }
    }

    pub fn schema(&self) -> QuestionSchema {
        self.schema
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.schema
            .position(question_id)
            .and_then(|i| self.values.get(i))
    }

    /// Questions paired with their current answers, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static QuestionDefinition, &AnswerValue)> {
        self.schema.questions().iter().zip(self.values.iter())
    }

    /// Overwrite the answer for `question_id`.
    pub fn set(&mut self, question_id: &str, value: AnswerValue) -> Result<(), QuestionnaireError> {
        let (index, question) = self.locate(question_id)?;
        let expected = question.kind.answer_shape();
        if value.shape() != expected {
            return Err(QuestionnaireError::ShapeMismatch {
                question: question_id.to_string(),
                expected,
                actual: value.shape(),
            });
        }
        self.values[index] = value.normalized();
        Ok(())
    }

    /// Add `option` to, or remove it from, a multi-choice answer.
    ///
    /// Other selections keep their relative order.
    pub fn toggle_choice(
        &mut self,
        question_id: &str,
        option: &str,
        selected: bool,
    ) -> Result<(), QuestionnaireError> {
        let (index, question) = self.locate(question_id)?;
        if !matches!(question.kind, QuestionKind::MultiChoice { .. }) {
            return Err(QuestionnaireError::WrongKind {
                question: question_id.to_string(),
                expected: "multi_choice",
            });
        }
        if let AnswerValue::TextSet(current) = &mut self.values[index] {
            let present = current.iter().any(|o| o == option);
            if selected && !present {
                current.push(option.to_string());
            } else if !selected && present {
                current.retain(|o| o != option);
            }
        }
        Ok(())
    }

    /// Update one slider of a dual range, leaving the other untouched.
    pub fn set_range_part(
        &mut self,
        question_id: &str,
        part: RangePart,
        value: i64,
    ) -> Result<(), QuestionnaireError> {
        let (index, question) = self.locate(question_id)?;
        if !matches!(question.kind, QuestionKind::DualRange { .. }) {
            return Err(QuestionnaireError::WrongKind {
                question: question_id.to_string(),
                expected: "dual_range",
            });
        }
        if let AnswerValue::IntegerPair(first, second) = &mut self.values[index] {
            match part {
                RangePart::First => *first = value,
                RangePart::Second => *second = value,
            }
        }
        Ok(())
    }

    /// Update one slot (0, 1 or 2) of a triple-text answer.
    pub fn set_text_slot(
        &mut self,
        question_id: &str,
        slot: usize,
        text: impl Into<String>,
    ) -> Result<(), QuestionnaireError> {
        let (index, question) = self.locate(question_id)?;
        if !matches!(question.kind, QuestionKind::TripleText) {
            return Err(QuestionnaireError::WrongKind {
                question: question_id.to_string(),
                expected: "triple_text",
            });
        }
        if let AnswerValue::TextTriple(slots) = &mut self.values[index] {
            let target = slots
                .get_mut(slot)
                .ok_or_else(|| QuestionnaireError::SlotOutOfRange {
                    question: question_id.to_string(),
                    slot,
                })?;
            *target = text.into();
        }
        Ok(())
    }

    fn locate(
        &self,
        question_id: &str,
    ) -> Result<(usize, &'static QuestionDefinition), QuestionnaireError> {
        let index = self
            .schema
            .position(question_id)
            .ok_or_else(|| QuestionnaireError::UnknownQuestion(question_id.to_string()))?;
        let question = self
            .schema
            .get(index)
            .ok_or_else(|| QuestionnaireError::UnknownQuestion(question_id.to_string()))?;
        Ok((index, question))
    }
}

/// Wire form: one field per question id, except dual ranges which emit one
/// field per slider.
impl Serialize for AnswerRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (question, value) in self.iter() {
            match (&question.kind, value) {
                (QuestionKind::DualRange { first, second }, AnswerValue::IntegerPair(a, b)) => {
                    map.serialize_entry(first.field, a)?;
                    map.serialize_entry(second.field, b)?;
                }
                (_, AnswerValue::Text(s)) => map.serialize_entry(question.id, s)?,
                (_, AnswerValue::TextSet(set)) => map.serialize_entry(question.id, set)?,
                (_, AnswerValue::TextTriple(slots)) => map.serialize_entry(question.id, slots)?,
                (_, AnswerValue::Integer(n)) => map.serialize_entry(question.id, n)?,
                (_, AnswerValue::IntegerPair(a, b)) => {
                    map.serialize_entry(question.id, &[a, b])?
                }
            }
        }
        map.end()
    }
}
