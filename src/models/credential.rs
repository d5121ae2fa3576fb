//! Credential domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login identifier prefix for student accounts
pub const STUDENT_LOGIN_PREFIX: &str = "STD";

/// Stored login identifier and password hash
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Credential {
    pub id: i64,
    pub user_id: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Login identifier for a student: `STD` followed by the decimal id.
///
/// No check is made against identifiers created by other schemes.
pub fn login_identifier(student_id: i64) -> String {
    format!("{}{}", STUDENT_LOGIN_PREFIX, student_id)
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_identifier() {
        assert_eq!(login_identifier(42), "STD42");
        assert_eq!(login_identifier(0), "STD0");
        assert_eq!(login_identifier(1234567890), "STD1234567890");
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let credential = Credential {
            id: 1,
            user_id: "STD42".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&credential).unwrap();
        assert_eq!(json["user_id"], "STD42");
        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains("argon2"));
    }
}
