//! 认证服务：注册、登录、会话校验

use crate::{
    auth::{PasswordHasher, SessionTokenService, TokenRejection},
    error::AppError,
    models::credential::{login_identifier, Credential},
    repository::{CredentialStore, PgCredentialStore},
};
use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use std::sync::Arc;

/// 会话令牌校验结果
#[derive(Debug)]
pub enum SessionState {
    Valid(Credential),
    SignatureInvalid,
    Expired,
    SubjectUnknown,
}

impl SessionState {
    /// 未通过时的原因（用于日志）
    pub fn reason(&self) -> &'static str {
        match self {
            SessionState::Valid(_) => "valid",
            SessionState::SignatureInvalid => "signature_invalid",
            SessionState::Expired => "expired",
            SessionState::SubjectUnknown => "subject_unknown",
        }
    }
}

pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<PasswordHasher>,
    tokens: Arc<SessionTokenService>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<PasswordHasher>,
        tokens: Arc<SessionTokenService>,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// 为学生注册登录凭证，登录名为 "STD" + 学生 ID
    pub async fn signup(&self, student_id: i64, password: &str) -> Result<Credential, AppError> {
        let password_hash = self.hash_password(password)?;
        let credential = self
            .store
            .insert(&login_identifier(student_id), &password_hash)
            .await?;

        record_signup(&credential);
        Ok(credential)
    }

    /// 哈希注册密码；须在开启事务之前调用，避免哈希期间占用连接
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        self.hasher.hash(password)
    }

    /// 在调用方的事务连接上注册凭证，与学生记录一同提交或回滚
    pub async fn signup_in(
        &self,
        conn: &mut PgConnection,
        student_id: i64,
        password_hash: &str,
    ) -> Result<Credential, AppError> {
        let credential =
            PgCredentialStore::insert_in(conn, &login_identifier(student_id), password_hash).await?;

        record_signup(&credential);
        Ok(credential)
    }

    /// 用户登录，成功返回凭证和会话令牌
    pub async fn login(&self, user_id: &str, password: &str) -> Result<(Credential, String), AppError> {
        let Some(credential) = self.store.find_by_user_id(user_id).await? else {
            tracing::debug!(user_id, "Login failed: unknown user");
            metrics::counter!("auth.login.failure").increment(1);
            return Err(AppError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &credential.password_hash) {
            tracing::debug!(user_id, "Login failed: wrong password");
            metrics::counter!("auth.login.failure").increment(1);
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(credential.id)?;

        tracing::info!(credential_id = credential.id, "User logged in");
        metrics::counter!("auth.login.success").increment(1);

        Ok((credential, token))
    }

    /// 校验会话令牌
    pub async fn authenticate(&self, token: &str) -> Result<SessionState, AppError> {
        self.authenticate_at(token, Utc::now()).await
    }

    /// 以 `now` 为当前时间校验会话令牌
    pub async fn authenticate_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionState, AppError> {
        let claims = match self.tokens.validate_at(token, now) {
            Ok(claims) => claims,
            Err(TokenRejection::SignatureInvalid) => return Ok(SessionState::SignatureInvalid),
            Err(TokenRejection::Expired) => return Ok(SessionState::Expired),
        };

        let Some(id) = claims.subject_id() else {
            return Ok(SessionState::SubjectUnknown);
        };

        Ok(match self.store.find_by_id(id).await? {
            Some(credential) => SessionState::Valid(credential),
            None => SessionState::SubjectUnknown,
        })
    }

    /// 会话有效期（秒），同时用作 Cookie Max-Age
    pub fn session_ttl_secs(&self) -> i64 {
        self.tokens.ttl().num_seconds()
    }

    pub fn tokens(&self) -> &SessionTokenService {
        &self.tokens
    }
}

fn record_signup(credential: &Credential) {
    tracing::info!(credential_id = credential.id, user_id = %credential.user_id, "Credential registered");
    metrics::counter!("auth.signup.total").increment(1);
}
