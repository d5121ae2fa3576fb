//! 认证相关 HTTP 处理器

use crate::{
    auth::{AuthContext, SESSION_COOKIE},
    error::AppError,
    middleware::AppState,
    models::credential::LoginRequest,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// 构建会话 Cookie
pub fn build_session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// 登录
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!(error = %e.body_text(), "Login body rejected");
        AppError::validation("Failed to read body")
    })?;

    let (_, token) = state.auth_service.login(&req.user_id, &req.password).await?;

    let cookie = build_session_cookie(
        &token,
        state.auth_service.session_ttl_secs(),
        state.config.security.cookie_secure,
    );
    let cookie = HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::Signing(format!("token is not a valid header value: {}", e)))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "message": "successfully logged in" })),
    ))
}

/// 返回当前会话身份，未认证时为 null
pub async fn validate(auth: Option<AuthContext>) -> impl IntoResponse {
    let credential = auth.map(|ctx| ctx.credential);

    // 键名拼写保持与现有客户端一致
    Json(json!({ "authenticaed_user": credential }))
}
