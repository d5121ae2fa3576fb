//! Interest repository

use super::insert_error;
use crate::{error::AppError, models::interest::*};
use sqlx::PgPool;

pub struct InterestRepository {
    db: PgPool,
}

impl InterestRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, req: &CreateInterestRequest) -> Result<Interest, AppError> {
        sqlx::query_as::<_, Interest>(
            r#"
            INSERT INTO interests (interest_name, description)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&req.interest_name)
        .bind(&req.description)
        .fetch_one(&self.db)
        .await
        .map_err(insert_error)
    }

    pub async fn list(&self) -> Result<Vec<Interest>, AppError> {
        let interests =
            sqlx::query_as::<_, Interest>("SELECT * FROM interests ORDER BY interest_id")
                .fetch_all(&self.db)
                .await?;

        Ok(interests)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Interest>, AppError> {
        let interest =
            sqlx::query_as::<_, Interest>("SELECT * FROM interests WHERE interest_id = $1")
                .bind(id)
                .fetch_optional(&self.db)
                .await?;

        Ok(interest)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM interests WHERE interest_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(exists)
    }

    pub async fn update(&self, interest: &Interest) -> Result<Option<Interest>, AppError> {
        let updated = sqlx::query_as::<_, Interest>(
            r#"
            UPDATE interests
            SET description = $2, updated_at = NOW()
            WHERE interest_id = $1
            RETURNING *
            "#,
        )
        .bind(interest.interest_id)
        .bind(&interest.description)
        .fetch_optional(&self.db)
        .await?;

        Ok(updated)
    }
}
