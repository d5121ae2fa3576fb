//! 会话校验中间件
//! 从 Cookie 读取会话令牌，解析为凭证身份并附加到请求扩展

use crate::{
    middleware::AppState,
    models::credential::Credential,
    services::auth_service::SessionState,
};
use axum::{
    extract::{OptionalFromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;
use std::sync::Arc;

/// 会话 Cookie 名称
pub const SESSION_COOKIE: &str = "Authorization";

/// 认证上下文（附加到请求扩展）
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub credential: Credential,
}

// handler 中以 Option<AuthContext> 提取：未认证时为 None
impl<S> OptionalFromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<AuthContext>().cloned())
    }
}

/// 从 Cookie 头提取会话令牌
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// 会话校验中间件
///
/// 任何失败（无令牌、签名错误、过期、主体不存在）都不会拒绝请求，
/// 只是不附加身份，由下游 handler 决定如何处理。
pub async fn session_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_session_token(req.headers()) else {
        tracing::debug!("No session cookie, continuing unauthenticated");
        return next.run(req).await;
    };

    match state.auth_service.authenticate(&token).await {
        Ok(SessionState::Valid(credential)) => {
            tracing::debug!(credential_id = credential.id, "Session validated");
            req.extensions_mut().insert(AuthContext { credential });
        }
        Ok(rejected) => {
            tracing::debug!(reason = rejected.reason(), "Session rejected, continuing unauthenticated");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Session lookup failed, continuing unauthenticated");
        }
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_session_token() {
        let mut headers = HeaderMap::new();
        headers.insert("cookie", "theme=dark; Authorization=abc.def.ghi".parse().unwrap());

        assert_eq!(extract_session_token(&headers), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_extract_session_token_missing() {
        let headers = HeaderMap::new();
        assert!(extract_session_token(&headers).is_none());

        let mut headers = HeaderMap::new();
        headers.insert("cookie", "theme=dark".parse().unwrap());
        assert!(extract_session_token(&headers).is_none());
    }

    #[test]
    fn test_bearer_header_is_not_a_session() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer abc.def.ghi".parse().unwrap());

        assert!(extract_session_token(&headers).is_none());
    }

    #[test]
    fn test_empty_cookie_value_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert("cookie", "Authorization=".parse().unwrap());

        assert!(extract_session_token(&headers).is_none());
    }
}
