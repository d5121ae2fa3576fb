//! Student repository

use super::insert_error;
use crate::{error::AppError, models::student::*};
use sqlx::{PgConnection, PgPool};

/// 学生附带兴趣方向
const SELECT_STUDENT: &str = r#"
    SELECT t.*, to_jsonb(i) AS interest
    FROM students t
    JOIN interests i ON i.interest_id = t.interest_id
"#;

pub struct StudentRepository {
    db: PgPool,
}

impl StudentRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 在调用方的事务中插入学生
    pub async fn insert(conn: &mut PgConnection, req: &CreateStudentRequest) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (phone_number, name, residence, interest_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&req.phone_number)
        .bind(&req.name)
        .bind(&req.residence)
        .bind(req.interest_id)
        .fetch_one(conn)
        .await
        .map_err(insert_error)
    }

    pub async fn list(&self) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(&format!("{} ORDER BY t.student_id", SELECT_STUDENT))
            .fetch_all(&self.db)
            .await?;

        Ok(students)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!("{} WHERE t.student_id = $1", SELECT_STUDENT))
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(student)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM students WHERE student_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(exists)
    }

    pub async fn update(&self, student: &Student) -> Result<Option<Student>, AppError> {
        let updated = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET phone_number = $2, residence = $3, updated_at = NOW()
            WHERE student_id = $1
            RETURNING *
            "#,
        )
        .bind(student.student_id)
        .bind(&student.phone_number)
        .bind(&student.residence)
        .fetch_optional(&self.db)
        .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM students WHERE student_id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
