//! Recorded answers.
//!
//! An [`AnswerSheet`] holds at most one [`Answer`] per question id. Writing
//! an answer for a question that already has one replaces it in place.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// A recorded response to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Id of the question being answered.
    pub question_id: String,
    /// 1 to 5 for Likert questions, option index for multiple choice.
    pub value: u32,
    /// Whether the chosen option was correct, for gradable questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}

impl Answer {
    /// Create a new answer.
    #[must_use]
    pub fn new(question_id: impl Into<String>, value: u32, is_correct: Option<bool>) -> Self {
        Self {
            question_id: question_id.into(),
            value,
            is_correct,
        }
    }
}

/// One entry of a saved answers file, before it has been checked against
/// the catalog.
///
/// `value` may be a JSON number or string; both are handed to
/// [`crate::Session::answer_changed`] as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAnswer {
    /// Id of the question being answered.
    pub question_id: String,
    /// The answer as written in the file.
    pub value: serde_json::Value,
}

impl SavedAnswer {
    /// The value as the presentation layer would submit it.
    #[must_use]
    pub fn raw_value(&self) -> String {
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Answers keyed by question id, kept in first-answered order.
///
/// Serialized as a plain array. Deserializing goes through
/// [`AnswerSheet::record`], so a later entry for the same question replaces
/// an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Answer>", into = "Vec<Answer>")]
pub struct AnswerSheet {
    answers: Vec<Answer>,
}

impl AnswerSheet {
    /// Create an empty sheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `answer`, replacing any earlier answer to the same question.
    pub fn record(&mut self, answer: Answer) {
        if let Some(existing) = self
            .answers
            .iter_mut()
            .find(|a| a.question_id == answer.question_id)
        {
            trace!(question = %answer.question_id, value = answer.value, "replacing answer");
            *existing = answer;
        } else {
            trace!(question = %answer.question_id, value = answer.value, "recording answer");
            self.answers.push(answer);
        }
    }

    /// The answer recorded for `question_id`, if any.
    #[must_use]
    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }

    /// Whether `question_id` has been answered.
    #[must_use]
    pub fn contains(&self, question_id: &str) -> bool {
        self.get(question_id).is_some()
    }

    /// Number of answered questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Whether nothing has been answered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Iterate answers in first-answered order.
    pub fn iter(&self) -> std::slice::Iter<'_, Answer> {
        self.answers.iter()
    }

    /// Remove every answer.
    pub fn clear(&mut self) {
        self.answers.clear();
    }
}

impl<'a> IntoIterator for &'a AnswerSheet {
    type Item = &'a Answer;
    type IntoIter = std::slice::Iter<'a, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<Answer>> for AnswerSheet {
    fn from(answers: Vec<Answer>) -> Self {
        answers.into_iter().collect()
    }
}

impl From<AnswerSheet> for Vec<Answer> {
    fn from(sheet: AnswerSheet) -> Self {
        sheet.answers
    }
}

impl FromIterator<Answer> for AnswerSheet {
    fn from_iter<I: IntoIterator<Item = Answer>>(iter: I) -> Self {
        let mut sheet = Self::new();
        for answer in iter {
            sheet.record(answer);
        }
        sheet
    }
}
