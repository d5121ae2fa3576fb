//! Placement test repositories (题目、作答、成绩)

use super::insert_error;
use crate::{error::AppError, models::placement::*};
use sqlx::PgPool;

/// 分班测试附带兴趣方向
const SELECT_PLACEMENT_TEST: &str = r#"
    SELECT t.*, to_jsonb(i) AS interest
    FROM placement_tests t
    JOIN interests i ON i.interest_id = t.interest_id
"#;

/// 作答附带题目和学生
const SELECT_PLACEMENT_TEST_ANSWER: &str = r#"
    SELECT t.*, to_jsonb(pt) AS placement_test, to_jsonb(st) AS student
    FROM placement_test_answers t
    JOIN placement_tests pt ON pt.placement_test_id = t.placement_test_id
    JOIN students st ON st.student_id = t.student_id
"#;

/// 成绩附带学生和兴趣方向
const SELECT_PLACEMENT_TEST_RESULT: &str = r#"
    SELECT t.*, to_jsonb(st) AS student, to_jsonb(i) AS interest
    FROM placement_test_results t
    JOIN students st ON st.student_id = t.student_id
    JOIN interests i ON i.interest_id = t.interest_id
"#;

pub struct PlacementTestRepository {
    db: PgPool,
}

impl PlacementTestRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, req: &CreatePlacementTestRequest) -> Result<PlacementTest, AppError> {
        let q = &req.question;

        sqlx::query_as::<_, PlacementTest>(
            r#"
            INSERT INTO placement_tests
                (question, correct_answer, option_a, option_b, option_c, option_d, interest_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&q.question)
        .bind(&q.correct_answer)
        .bind(&q.option_a)
        .bind(&q.option_b)
        .bind(&q.option_c)
        .bind(&q.option_d)
        .bind(req.interest_id)
        .fetch_one(&self.db)
        .await
        .map_err(insert_error)
    }

    pub async fn list(&self) -> Result<Vec<PlacementTest>, AppError> {
        let tests = sqlx::query_as::<_, PlacementTest>(
            &format!("{} ORDER BY t.placement_test_id", SELECT_PLACEMENT_TEST),
        )
        .fetch_all(&self.db)
        .await?;

        Ok(tests)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<PlacementTest>, AppError> {
        let test = sqlx::query_as::<_, PlacementTest>(
            &format!("{} WHERE t.placement_test_id = $1", SELECT_PLACEMENT_TEST),
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(test)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM placement_tests WHERE placement_test_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(exists)
    }

    pub async fn update(&self, test: &PlacementTest) -> Result<Option<PlacementTest>, AppError> {
        let updated = sqlx::query_as::<_, PlacementTest>(
            r#"
            UPDATE placement_tests
            SET question = $2, correct_answer = $3, option_a = $4, option_b = $5,
                option_c = $6, option_d = $7, updated_at = NOW()
            WHERE placement_test_id = $1
            RETURNING *
            "#,
        )
        .bind(test.placement_test_id)
        .bind(&test.question)
        .bind(&test.correct_answer)
        .bind(&test.option_a)
        .bind(&test.option_b)
        .bind(&test.option_c)
        .bind(&test.option_d)
        .fetch_optional(&self.db)
        .await?;

        Ok(updated)
    }
}

pub struct PlacementTestAnswerRepository {
    db: PgPool,
}

impl PlacementTestAnswerRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        req: &CreatePlacementTestAnswerRequest,
    ) -> Result<PlacementTestAnswer, AppError> {
        sqlx::query_as::<_, PlacementTestAnswer>(
            r#"
            INSERT INTO placement_test_answers (placement_test_id, student_id, student_answer)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(req.placement_test_id)
        .bind(req.student_id)
        .bind(&req.student_answer)
        .fetch_one(&self.db)
        .await
        .map_err(insert_error)
    }

    pub async fn list(&self) -> Result<Vec<PlacementTestAnswer>, AppError> {
        let answers = sqlx::query_as::<_, PlacementTestAnswer>(
            &format!("{} ORDER BY t.placement_test_answer_id", SELECT_PLACEMENT_TEST_ANSWER),
        )
        .fetch_all(&self.db)
        .await?;

        Ok(answers)
    }

    pub async fn list_by_student(&self, student_id: i64) -> Result<Vec<PlacementTestAnswer>, AppError> {
        let answers = sqlx::query_as::<_, PlacementTestAnswer>(
            &format!("{} WHERE t.student_id = $1 ORDER BY t.placement_test_answer_id", SELECT_PLACEMENT_TEST_ANSWER),
        )
        .bind(student_id)
        .fetch_all(&self.db)
        .await?;

        Ok(answers)
    }

    pub async fn list_by_placement_test(
        &self,
        placement_test_id: i64,
    ) -> Result<Vec<PlacementTestAnswer>, AppError> {
        let answers = sqlx::query_as::<_, PlacementTestAnswer>(
            &format!("{} WHERE t.placement_test_id = $1 ORDER BY t.placement_test_answer_id", SELECT_PLACEMENT_TEST_ANSWER),
        )
        .bind(placement_test_id)
        .fetch_all(&self.db)
        .await?;

        Ok(answers)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<PlacementTestAnswer>, AppError> {
        let answer = sqlx::query_as::<_, PlacementTestAnswer>(
            &format!("{} WHERE t.placement_test_answer_id = $1", SELECT_PLACEMENT_TEST_ANSWER),
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(answer)
    }

    pub async fn update(&self, answer: &PlacementTestAnswer) -> Result<Option<PlacementTestAnswer>, AppError> {
        let updated = sqlx::query_as::<_, PlacementTestAnswer>(
            r#"
            UPDATE placement_test_answers
            SET student_answer = $2, updated_at = NOW()
            WHERE placement_test_answer_id = $1
            RETURNING *
            "#,
        )
        .bind(answer.placement_test_answer_id)
        .bind(&answer.student_answer)
        .fetch_optional(&self.db)
        .await?;

        Ok(updated)
    }
}

pub struct PlacementTestResultRepository {
    db: PgPool,
}

impl PlacementTestResultRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// test_date 取服务器时间
    pub async fn create(
        &self,
        req: &CreatePlacementTestResultRequest,
    ) -> Result<PlacementTestResult, AppError> {
        sqlx::query_as::<_, PlacementTestResult>(
            r#"
            INSERT INTO placement_test_results (student_id, interest_id, score, test_date)
            VALUES ($1, $2, $3, NOW())
            RETURNING *
            "#,
        )
        .bind(req.student_id)
        .bind(req.interest_id)
        .bind(req.score)
        .fetch_one(&self.db)
        .await
        .map_err(insert_error)
    }

    pub async fn list(&self) -> Result<Vec<PlacementTestResult>, AppError> {
        let results = sqlx::query_as::<_, PlacementTestResult>(
            &format!("{} ORDER BY t.placement_test_result_id", SELECT_PLACEMENT_TEST_RESULT),
        )
        .fetch_all(&self.db)
        .await?;

        Ok(results)
    }

    pub async fn list_by_student(&self, student_id: i64) -> Result<Vec<PlacementTestResult>, AppError> {
        let results = sqlx::query_as::<_, PlacementTestResult>(
            &format!("{} WHERE t.student_id = $1 ORDER BY t.placement_test_result_id", SELECT_PLACEMENT_TEST_RESULT),
        )
        .bind(student_id)
        .fetch_all(&self.db)
        .await?;

        Ok(results)
    }

    pub async fn list_by_interest(&self, interest_id: i64) -> Result<Vec<PlacementTestResult>, AppError> {
        let results = sqlx::query_as::<_, PlacementTestResult>(
            &format!("{} WHERE t.interest_id = $1 ORDER BY t.placement_test_result_id", SELECT_PLACEMENT_TEST_RESULT),
        )
        .bind(interest_id)
        .fetch_all(&self.db)
        .await?;

        Ok(results)
    }
}
