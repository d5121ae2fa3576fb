//! Credential store (凭证存储)

use crate::{db, error::AppError, models::credential::Credential};
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

/// Storage contract for login credentials
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a credential. A taken `user_id` fails with `DuplicateIdentifier`.
    async fn insert(&self, user_id: &str, password_hash: &str) -> Result<Credential, AppError>;

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Credential>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Credential>, AppError>;
}

/// PostgreSQL-backed credential store
pub struct PgCredentialStore {
    db: PgPool,
}

impl PgCredentialStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 在调用方的连接上插入凭证，用于与学生记录共用一个事务
    pub async fn insert_in(
        conn: &mut PgConnection,
        user_id: &str,
        password_hash: &str,
    ) -> Result<Credential, AppError> {
        sqlx::query_as::<_, Credential>(
            r#"
            INSERT INTO credentials (user_id, password_hash)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(password_hash)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            if db::is_unique_violation(&e) {
                AppError::DuplicateIdentifier
            } else {
                AppError::Database(e)
            }
        })
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn insert(&self, user_id: &str, password_hash: &str) -> Result<Credential, AppError> {
        let mut conn = self.db.acquire().await?;
        Self::insert_in(&mut *conn, user_id, password_hash).await
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Credential>, AppError> {
        let credential =
            sqlx::query_as::<_, Credential>("SELECT * FROM credentials WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.db)
                .await?;

        Ok(credential)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Credential>, AppError> {
        let credential = sqlx::query_as::<_, Credential>("SELECT * FROM credentials WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(credential)
    }
}
