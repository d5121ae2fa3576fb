//! Quiz models: questions, answers and results

use super::{student::Student, subject::Subject, Related};
use super::patch::{set, Patch};
use super::question::{QuestionFields, QuestionPatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Quiz question for a subject
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Quiz {
    pub quiz_id: i64,
    pub subject_id: i64,
    pub question: String,
    pub correct_answer: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Related<Subject>,
}

/// Create quiz request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuizRequest {
    pub subject_id: i64,
    #[serde(flatten)]
    #[validate(nested)]
    pub question: QuestionFields,
}

impl Patch<Quiz> for QuestionPatch {
    fn is_empty(&self) -> bool {
        !self.has_fields()
    }

    fn apply_to(self, target: &mut Quiz) {
        set(&mut target.question, self.question);
        set(&mut target.correct_answer, self.correct_answer);
        set(&mut target.option_a, self.option_a);
        set(&mut target.option_b, self.option_b);
        set(&mut target.option_c, self.option_c);
        set(&mut target.option_d, self.option_d);
    }
}

/// A student's answer to a quiz question
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuizAnswer {
    pub quiz_answer_id: i64,
    pub quiz_id: i64,
    pub student_id: i64,
    pub student_answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz: Related<Quiz>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Related<Student>,
}

/// Create quiz answer request
#[derive(Debug, Deserialize)]
pub struct CreateQuizAnswerRequest {
    pub quiz_id: i64,
    pub student_id: i64,
    pub student_answer: String,
}

/// Quiz score of a student for a subject
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuizResult {
    pub quiz_result_id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub score: i32,
    pub quiz_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Related<Student>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Related<Subject>,
}

/// Create quiz result request; `quiz_date` is set by the server
#[derive(Debug, Deserialize)]
pub struct CreateQuizResultRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub score: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::patch::merge;

    fn quiz() -> Quiz {
        Quiz {
            quiz_id: 3,
            subject_id: 1,
            question: "Capital of France?".to_string(),
            correct_answer: "c".to_string(),
            option_a: "Rome".to_string(),
            option_b: "Berlin".to_string(),
            option_c: "Paris".to_string(),
            option_d: "Madrid".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            subject: None,
        }
    }

    #[test]
    fn test_quiz_patch_updates_answer_key() {
        let patch = QuestionPatch {
            correct_answer: Some("a".to_string()),
            option_a: Some("Paris".to_string()),
            ..Default::default()
        };

        let merged = merge(quiz(), patch).unwrap();
        assert_eq!(merged.correct_answer, "a");
        assert_eq!(merged.option_a, "Paris");
        assert_eq!(merged.option_c, "Paris");
    }

    #[test]
    fn test_empty_question_patch_rejected() {
        assert!(merge(quiz(), QuestionPatch::default()).is_err());
    }
}
