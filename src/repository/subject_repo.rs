//! Subject and enrollment repositories

use super::insert_error;
use crate::{error::AppError, models::subject::*};
use sqlx::PgPool;

/// 科目附带兴趣方向
const SELECT_SUBJECT: &str = r#"
    SELECT t.*, to_jsonb(i) AS interest
    FROM subjects t
    JOIN interests i ON i.interest_id = t.interest_id
"#;

/// 选课附带学生和科目
const SELECT_SUBJECT_JOINED: &str = r#"
    SELECT t.*, to_jsonb(st) AS student, to_jsonb(su) AS subject
    FROM subjects_joined t
    JOIN students st ON st.student_id = t.student_id
    JOIN subjects su ON su.subject_id = t.subject_id
"#;

pub struct SubjectRepository {
    db: PgPool,
}

impl SubjectRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, req: &CreateSubjectRequest) -> Result<Subject, AppError> {
        sqlx::query_as::<_, Subject>(
            r#"
            INSERT INTO subjects (subject_name, description, interest_id, prerequisite_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&req.subject_name)
        .bind(&req.description)
        .bind(req.interest_id)
        .bind(req.prerequisite_id)
        .fetch_one(&self.db)
        .await
        .map_err(insert_error)
    }

    pub async fn list(&self) -> Result<Vec<Subject>, AppError> {
        let subjects = sqlx::query_as::<_, Subject>(&format!("{} ORDER BY t.subject_id", SELECT_SUBJECT))
            .fetch_all(&self.db)
            .await?;

        Ok(subjects)
    }

    pub async fn list_by_interest(&self, interest_id: i64) -> Result<Vec<Subject>, AppError> {
        let subjects = sqlx::query_as::<_, Subject>(
            &format!("{} WHERE t.interest_id = $1 ORDER BY t.subject_id", SELECT_SUBJECT),
        )
        .bind(interest_id)
        .fetch_all(&self.db)
        .await?;

        Ok(subjects)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Subject>, AppError> {
        let subject = sqlx::query_as::<_, Subject>(&format!("{} WHERE t.subject_id = $1", SELECT_SUBJECT))
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(subject)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM subjects WHERE subject_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(exists)
    }

    pub async fn update(&self, subject: &Subject) -> Result<Option<Subject>, AppError> {
        sqlx::query_as::<_, Subject>(
            r#"
            UPDATE subjects
            SET description = $2, prerequisite_id = $3, updated_at = NOW()
            WHERE subject_id = $1
            RETURNING *
            "#,
        )
        .bind(subject.subject_id)
        .bind(&subject.description)
        .bind(subject.prerequisite_id)
        .fetch_optional(&self.db)
        .await
        .map_err(insert_error)
    }
}

pub struct SubjectJoinedRepository {
    db: PgPool,
}

impl SubjectJoinedRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// date_joined 取服务器时间
    pub async fn create(&self, req: &CreateSubjectJoinedRequest) -> Result<SubjectJoined, AppError> {
        sqlx::query_as::<_, SubjectJoined>(
            r#"
            INSERT INTO subjects_joined (student_id, subject_id, date_joined)
            VALUES ($1, $2, NOW())
            RETURNING *
            "#,
        )
        .bind(req.student_id)
        .bind(req.subject_id)
        .fetch_one(&self.db)
        .await
        .map_err(insert_error)
    }

    pub async fn list(&self) -> Result<Vec<SubjectJoined>, AppError> {
        let rows = sqlx::query_as::<_, SubjectJoined>(
            &format!("{} ORDER BY t.subject_joined_id", SELECT_SUBJECT_JOINED),
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    pub async fn list_by_student(&self, student_id: i64) -> Result<Vec<SubjectJoined>, AppError> {
        let rows = sqlx::query_as::<_, SubjectJoined>(
            &format!("{} WHERE t.student_id = $1 ORDER BY t.subject_joined_id", SELECT_SUBJECT_JOINED),
        )
        .bind(student_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    pub async fn list_by_subject(&self, subject_id: i64) -> Result<Vec<SubjectJoined>, AppError> {
        let rows = sqlx::query_as::<_, SubjectJoined>(
            &format!("{} WHERE t.subject_id = $1 ORDER BY t.subject_joined_id", SELECT_SUBJECT_JOINED),
        )
        .bind(subject_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }
}
