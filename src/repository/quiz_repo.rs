//! Quiz repositories

use super::insert_error;
use crate::{error::AppError, models::quiz::*};
use sqlx::PgPool;

/// 测验题附带科目
const SELECT_QUIZ: &str = r#"
    SELECT t.*, to_jsonb(su) AS subject
    FROM quizzes t
    JOIN subjects su ON su.subject_id = t.subject_id
"#;

/// 作答附带题目和学生
const SELECT_QUIZ_ANSWER: &str = r#"
    SELECT t.*, to_jsonb(q) AS quiz, to_jsonb(st) AS student
    FROM quiz_answers t
    JOIN quizzes q ON q.quiz_id = t.quiz_id
    JOIN students st ON st.student_id = t.student_id
"#;

/// 成绩附带学生和科目
const SELECT_QUIZ_RESULT: &str = r#"
    SELECT t.*, to_jsonb(st) AS student, to_jsonb(su) AS subject
    FROM quiz_results t
    JOIN students st ON st.student_id = t.student_id
    JOIN subjects su ON su.subject_id = t.subject_id
"#;

pub struct QuizRepository {
    db: PgPool,
}

impl QuizRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, req: &CreateQuizRequest) -> Result<Quiz, AppError> {
        let q = &req.question;

        sqlx::query_as::<_, Quiz>(
            r#"
            INSERT INTO quizzes
                (subject_id, question, correct_answer, option_a, option_b, option_c, option_d)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(req.subject_id)
        .bind(&q.question)
        .bind(&q.correct_answer)
        .bind(&q.option_a)
        .bind(&q.option_b)
        .bind(&q.option_c)
        .bind(&q.option_d)
        .fetch_one(&self.db)
        .await
        .map_err(insert_error)
    }

    pub async fn list(&self) -> Result<Vec<Quiz>, AppError> {
        let quizzes = sqlx::query_as::<_, Quiz>(&format!("{} ORDER BY t.quiz_id", SELECT_QUIZ))
            .fetch_all(&self.db)
            .await?;

        Ok(quizzes)
    }

    pub async fn list_by_subject(&self, subject_id: i64) -> Result<Vec<Quiz>, AppError> {
        let quizzes =
            sqlx::query_as::<_, Quiz>(&format!("{} WHERE t.subject_id = $1 ORDER BY t.quiz_id", SELECT_QUIZ))
                .bind(subject_id)
                .fetch_all(&self.db)
                .await?;

        Ok(quizzes)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Quiz>, AppError> {
        let quiz = sqlx::query_as::<_, Quiz>(&format!("{} WHERE t.quiz_id = $1", SELECT_QUIZ))
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(quiz)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM quizzes WHERE quiz_id = $1)")
                .bind(id)
                .fetch_one(&self.db)
                .await?;

        Ok(exists)
    }

    pub async fn update(&self, quiz: &Quiz) -> Result<Option<Quiz>, AppError> {
        let updated = sqlx::query_as::<_, Quiz>(
            r#"
            UPDATE quizzes
            SET question = $2, correct_answer = $3, option_a = $4, option_b = $5,
                option_c = $6, option_d = $7, updated_at = NOW()
            WHERE quiz_id = $1
            RETURNING *
            "#,
        )
        .bind(quiz.quiz_id)
        .bind(&quiz.question)
        .bind(&quiz.correct_answer)
        .bind(&quiz.option_a)
        .bind(&quiz.option_b)
        .bind(&quiz.option_c)
        .bind(&quiz.option_d)
        .fetch_optional(&self.db)
        .await?;

        Ok(updated)
    }
}

pub struct QuizAnswerRepository {
    db: PgPool,
}

impl QuizAnswerRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, req: &CreateQuizAnswerRequest) -> Result<QuizAnswer, AppError> {
        sqlx::query_as::<_, QuizAnswer>(
            r#"
            INSERT INTO quiz_answers (quiz_id, student_id, student_answer)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(req.quiz_id)
        .bind(req.student_id)
        .bind(&req.student_answer)
        .fetch_one(&self.db)
        .await
        .map_err(insert_error)
    }

    pub async fn list(&self) -> Result<Vec<QuizAnswer>, AppError> {
        let answers =
            sqlx::query_as::<_, QuizAnswer>(&format!("{} ORDER BY t.quiz_answer_id", SELECT_QUIZ_ANSWER))
                .fetch_all(&self.db)
                .await?;

        Ok(answers)
    }

    pub async fn list_by_student(&self, student_id: i64) -> Result<Vec<QuizAnswer>, AppError> {
        let answers = sqlx::query_as::<_, QuizAnswer>(
            &format!("{} WHERE t.student_id = $1 ORDER BY t.quiz_answer_id", SELECT_QUIZ_ANSWER),
        )
        .bind(student_id)
        .fetch_all(&self.db)
        .await?;

        Ok(answers)
    }

    pub async fn list_by_quiz(&self, quiz_id: i64) -> Result<Vec<QuizAnswer>, AppError> {
        let answers = sqlx::query_as::<_, QuizAnswer>(
            &format!("{} WHERE t.quiz_id = $1 ORDER BY t.quiz_answer_id", SELECT_QUIZ_ANSWER),
        )
        .bind(quiz_id)
        .fetch_all(&self.db)
        .await?;

        Ok(answers)
    }
}

pub struct QuizResultRepository {
    db: PgPool,
}

impl QuizResultRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// quiz_date 取服务器时间
    pub async fn create(&self, req: &CreateQuizResultRequest) -> Result<QuizResult, AppError> {
        sqlx::query_as::<_, QuizResult>(
            r#"
            INSERT INTO quiz_results (student_id, subject_id, score, quiz_date)
            VALUES ($1, $2, $3, NOW())
            RETURNING *
            "#,
        )
        .bind(req.student_id)
        .bind(req.subject_id)
        .bind(req.score)
        .fetch_one(&self.db)
        .await
        .map_err(insert_error)
    }

    pub async fn list(&self) -> Result<Vec<QuizResult>, AppError> {
        let results =
            sqlx::query_as::<_, QuizResult>(&format!("{} ORDER BY t.quiz_result_id", SELECT_QUIZ_RESULT))
                .fetch_all(&self.db)
                .await?;

        Ok(results)
    }

    pub async fn list_by_student(&self, student_id: i64) -> Result<Vec<QuizResult>, AppError> {
        let results = sqlx::query_as::<_, QuizResult>(
            &format!("{} WHERE t.student_id = $1 ORDER BY t.quiz_result_id", SELECT_QUIZ_RESULT),
        )
        .bind(student_id)
        .fetch_all(&self.db)
        .await?;

        Ok(results)
    }

    pub async fn list_by_subject(&self, subject_id: i64) -> Result<Vec<QuizResult>, AppError> {
        let results = sqlx::query_as::<_, QuizResult>(
            &format!("{} WHERE t.subject_id = $1 ORDER BY t.quiz_result_id", SELECT_QUIZ_RESULT),
        )
        .bind(subject_id)
        .fetch_all(&self.db)
        .await?;

        Ok(results)
    }
}
