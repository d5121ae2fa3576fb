//! 统一错误模型
//! 定义所有错误类型和错误响应格式

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ForeignKeyNotFound(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Duplicate login identifier")]
    DuplicateIdentifier,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl AppError {
    pub fn not_found(entity: &str) -> Self {
        AppError::NotFound(format!("{} not found", entity))
    }

    pub fn missing_reference(entity: &str) -> Self {
        AppError::ForeignKeyNotFound(format!("{} with that ID not found", entity))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::ForeignKeyNotFound(_)
            | AppError::InvalidCredentials
            | AppError::DuplicateIdentifier
            | AppError::Signing(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) | AppError::ForeignKeyNotFound(msg) => {
                msg.clone()
            }
            AppError::InvalidCredentials => "Invalid username or password".to_string(),
            AppError::DuplicateIdentifier => {
                "Failed to create user, try to use different username".to_string()
            }
            AppError::Signing(_) => "Failed to create token".to_string(),
            AppError::Database(_) => "Database error occurred".to_string(),
            AppError::Config(_) => "Configuration error".to_string(),
        }
    }

    /// 获取错误码
    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }
}

/// 错误响应 DTO
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() || matches!(self, AppError::Signing(_)) {
            tracing::error!(code = self.code(), message = %self, "Application error");
        } else {
            tracing::warn!(code = self.code(), message = %self, "Request rejected");
        }

        let body = ErrorResponse {
            error: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// 请求体缺失或无法解析时统一返回 400
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// 取第一个字段规则的提示语；没有自定义提示时使用完整描述
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .iter()
            .flat_map(|(_, errs)| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());

        AppError::Validation(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::validation("bad").code(), 400);
        assert_eq!(AppError::missing_reference("Interest").code(), 400);
        assert_eq!(AppError::not_found("Student").code(), 404);
        assert_eq!(AppError::InvalidCredentials.code(), 400);
        assert_eq!(AppError::DuplicateIdentifier.code(), 400);
        assert_eq!(AppError::Signing("no key".to_string()).code(), 400);
        assert_eq!(AppError::Config("x".to_string()).code(), 500);
    }

    #[test]
    fn test_user_message_no_sensitive_info() {
        let error = AppError::Database(sqlx::Error::RowNotFound);
        let message = error.user_message();
        assert_eq!(message, "Database error occurred");
        assert!(!message.contains("sqlx"));

        let signing = AppError::Signing("HMAC key rejected".to_string());
        assert_eq!(signing.user_message(), "Failed to create token");
    }

    #[test]
    fn test_entity_messages() {
        assert_eq!(AppError::not_found("Quiz").user_message(), "Quiz not found");
        assert_eq!(
            AppError::missing_reference("Subject").user_message(),
            "Subject with that ID not found"
        );
    }

    #[test]
    fn test_validation_errors_use_rule_message() {
        let mut errors = validator::ValidationErrors::new();
        errors.add(
            "phone_number",
            validator::ValidationError::new("regex").with_message("Phone Number must be number".into()),
        );

        let error = AppError::from(errors);
        assert_eq!(error.user_message(), "Phone Number must be number");
        assert_eq!(error.code(), 400);
    }

    #[test]
    fn test_duplicate_identifier_does_not_name_field() {
        let message = AppError::DuplicateIdentifier.user_message();
        assert!(!message.contains("user_id"));
        assert!(!message.contains("STD"));
    }
}
