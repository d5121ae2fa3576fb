//! 认证服务测试：注册、登录与会话校验

use chrono::{Duration, Utc};
use edu_platform::{
    auth::SessionTokenService,
    error::AppError,
    services::{AuthService, SessionState},
};
use secrecy::Secret;
use std::sync::Arc;

mod common;
use common::{create_auth_service, create_test_config, InMemoryCredentialStore};

fn service() -> (AuthService, Arc<InMemoryCredentialStore>) {
    let store = Arc::new(InMemoryCredentialStore::new());
    let service = create_auth_service(&create_test_config(), store.clone());
    (service, store)
}

#[tokio::test]
async fn test_signup_creates_prefixed_identifier() {
    let (service, store) = service();

    let credential = service.signup(42, "abc123").await.unwrap();

    assert_eq!(credential.user_id, "STD42");
    assert_ne!(credential.password_hash, "abc123");
    assert!(credential.password_hash.starts_with("$argon2id$"));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_duplicate_signup_keeps_existing_credential() {
    let (service, store) = service();

    service.signup(42, "abc123").await.unwrap();
    let result = service.signup(42, "other-password").await;

    assert!(matches!(result, Err(AppError::DuplicateIdentifier)));
    assert_eq!(store.len(), 1);

    // 原密码仍然有效，新密码无效
    assert!(service.login("STD42", "abc123").await.is_ok());
    assert!(matches!(
        service.login("STD42", "other-password").await,
        Err(AppError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_login_issues_token_for_credential() {
    let (service, _) = service();
    let credential = service.signup(42, "abc123").await.unwrap();

    let (logged_in, token) = service.login("STD42", "abc123").await.unwrap();
    assert_eq!(logged_in.id, credential.id);

    let claims = service.tokens().validate(&token).unwrap();
    assert_eq!(claims.subject_id(), Some(credential.id));
    assert_eq!(claims.exp - claims.iat, service.session_ttl_secs());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (service, _) = service();
    service.signup(42, "abc123").await.unwrap();

    let unknown = service.login("STD43", "abc123").await.unwrap_err();
    let wrong = service.login("STD42", "abc124").await.unwrap_err();

    assert_eq!(unknown.user_message(), wrong.user_message());
    assert_eq!(unknown.code(), 400);
}

#[tokio::test]
async fn test_authenticate_valid_session() {
    let (service, _) = service();
    service.signup(42, "abc123").await.unwrap();
    let (_, token) = service.login("STD42", "abc123").await.unwrap();

    match service.authenticate(&token).await.unwrap() {
        SessionState::Valid(credential) => assert_eq!(credential.user_id, "STD42"),
        other => panic!("expected valid session, got {:?}", other),
    }
}

#[tokio::test]
async fn test_authenticate_expiry_boundary() {
    let (service, _) = service();
    let credential = service.signup(42, "abc123").await.unwrap();

    let issued_at = Utc::now();
    let token = service.tokens().issue_at(credential.id, issued_at).unwrap();

    let just_before = issued_at + Duration::days(30) - Duration::seconds(1);
    assert!(matches!(
        service.authenticate_at(&token, just_before).await.unwrap(),
        SessionState::Valid(_)
    ));

    let at_expiry = issued_at + Duration::days(30);
    assert!(matches!(
        service.authenticate_at(&token, at_expiry).await.unwrap(),
        SessionState::Expired
    ));
}

#[tokio::test]
async fn test_authenticate_rejects_foreign_secret() {
    let (service, _) = service();
    let credential = service.signup(42, "abc123").await.unwrap();

    let other = SessionTokenService::new(
        &Secret::new("another-secret-key-that-is-32-chars-long".to_string()),
        3600,
    )
    .unwrap();
    let token = other.issue(credential.id).unwrap();

    assert!(matches!(
        service.authenticate(&token).await.unwrap(),
        SessionState::SignatureInvalid
    ));
}

#[tokio::test]
async fn test_authenticate_unknown_subject() {
    let (service, _) = service();
    let token = service.tokens().issue(999).unwrap();

    assert!(matches!(
        service.authenticate(&token).await.unwrap(),
        SessionState::SubjectUnknown
    ));
}
