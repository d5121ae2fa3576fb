//! Multiple-choice question fields shared by placement tests and quizzes

use serde::Deserialize;
use validator::Validate;

/// Question body of a create request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuestionFields {
    #[validate(length(min = 1, message = "Question is required"))]
    pub question: String,
    #[validate(length(min = 1, message = "Correct answer is required"))]
    pub correct_answer: String,
    #[serde(default)]
    pub option_a: String,
    #[serde(default)]
    pub option_b: String,
    #[serde(default)]
    pub option_c: String,
    #[serde(default)]
    pub option_d: String,
}

/// Partial update of a question
#[derive(Debug, Default, Deserialize)]
pub struct QuestionPatch {
    pub question: Option<String>,
    pub correct_answer: Option<String>,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
}

impl QuestionPatch {
    pub(crate) fn has_fields(&self) -> bool {
        self.question.is_some()
            || self.correct_answer.is_some()
            || self.option_a.is_some()
            || self.option_b.is_some()
            || self.option_c.is_some()
            || self.option_d.is_some()
    }
}
