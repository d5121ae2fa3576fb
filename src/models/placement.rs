//! Placement test models: questions, answers and results

use super::{interest::Interest, student::Student, Related};
use super::patch::{set, Patch};
use super::question::{QuestionFields, QuestionPatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Placement test question for an interest
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlacementTest {
    pub placement_test_id: i64,
    pub question: String,
    pub correct_answer: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub interest_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest: Related<Interest>,
}

/// Create placement test request
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlacementTestRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub question: QuestionFields,
    pub interest_id: i64,
}

impl Patch<PlacementTest> for QuestionPatch {
    fn is_empty(&self) -> bool {
        !self.has_fields()
    }

    fn apply_to(self, target: &mut PlacementTest) {
        set(&mut target.question, self.question);
        set(&mut target.correct_answer, self.correct_answer);
        set(&mut target.option_a, self.option_a);
        set(&mut target.option_b, self.option_b);
        set(&mut target.option_c, self.option_c);
        set(&mut target.option_d, self.option_d);
    }
}

/// A student's answer to a placement test question
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlacementTestAnswer {
    pub placement_test_answer_id: i64,
    pub placement_test_id: i64,
    pub student_id: i64,
    pub student_answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement_test: Related<PlacementTest>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Related<Student>,
}

/// Create placement test answer request
#[derive(Debug, Deserialize)]
pub struct CreatePlacementTestAnswerRequest {
    pub placement_test_id: i64,
    pub student_id: i64,
    pub student_answer: String,
}

/// Update placement test answer request
#[derive(Debug, Default, Deserialize)]
pub struct PlacementTestAnswerPatch {
    pub student_answer: Option<String>,
}

impl Patch<PlacementTestAnswer> for PlacementTestAnswerPatch {
    fn is_empty(&self) -> bool {
        self.student_answer.is_none()
    }

    fn apply_to(self, target: &mut PlacementTestAnswer) {
        set(&mut target.student_answer, self.student_answer);
    }
}

/// Placement test score of a student for an interest
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlacementTestResult {
    pub placement_test_result_id: i64,
    pub student_id: i64,
    pub interest_id: i64,
    pub score: i32,
    pub test_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Related<Student>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest: Related<Interest>,
}

/// Create placement test result request; `test_date` is set by the server
#[derive(Debug, Deserialize)]
pub struct CreatePlacementTestResultRequest {
    pub student_id: i64,
    pub interest_id: i64,
    pub score: i32,
}
