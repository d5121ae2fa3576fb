//! Student domain models

use super::{interest::Interest, Related};
use super::patch::{set, Patch};
use super::{DIGITS_ONLY, PLAIN_TEXT};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Student
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub student_id: i64,
    pub phone_number: String,
    pub name: String,
    pub residence: String,
    pub interest_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest: Related<Interest>,
}

/// Create student request
///
/// The password is not stored on the student; it registers the student's
/// login credential.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    #[validate(regex(path = *DIGITS_ONLY, message = "Phone Number must be number"))]
    pub phone_number: String,
    #[validate(regex(path = *PLAIN_TEXT, message = "Residence must be alphabet"))]
    pub residence: String,
    pub interest_id: i64,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Update student request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct StudentPatch {
    #[validate(regex(path = *DIGITS_ONLY, message = "Phone Number must be number"))]
    pub phone_number: Option<String>,
    #[validate(regex(path = *PLAIN_TEXT, message = "Residence must be alphabet"))]
    pub residence: Option<String>,
}

impl Patch<Student> for StudentPatch {
    fn is_empty(&self) -> bool {
        self.phone_number.is_none() && self.residence.is_none()
    }

    fn apply_to(self, target: &mut Student) {
        set(&mut target.phone_number, self.phone_number);
        set(&mut target.residence, self.residence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::patch::merge;

    fn student() -> Student {
        Student {
            student_id: 42,
            phone_number: "08123".to_string(),
            name: "Ada".to_string(),
            residence: "Jakarta".to_string(),
            interest_id: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            interest: None,
        }
    }

    #[test]
    fn test_create_request_validation() {
        let valid = CreateStudentRequest {
            name: "Ada".to_string(),
            phone_number: "0812345".to_string(),
            residence: "South Jakarta".to_string(),
            interest_id: 1,
            password: "abc123".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_phone = CreateStudentRequest {
            phone_number: "0812-345".to_string(),
            ..valid
        };
        assert!(bad_phone.validate().is_err());
    }

    #[test]
    fn test_patch_validation() {
        let patch = StudentPatch {
            phone_number: Some("12ab".to_string()),
            residence: None,
        };
        let errors = patch.validate().unwrap_err();
        assert!(errors.to_string().contains("Phone Number must be number"));

        let patch = StudentPatch {
            phone_number: None,
            residence: Some("Block 7".to_string()),
        };
        assert!(patch.validate().is_err());

        // 未设置的字段不校验
        assert!(StudentPatch::default().validate().is_ok());
    }

    #[test]
    fn test_patch_merge() {
        let patch = StudentPatch {
            phone_number: Some("0899".to_string()),
            residence: None,
        };

        let merged = merge(student(), patch).unwrap();
        assert_eq!(merged.phone_number, "0899");
        assert_eq!(merged.residence, "Jakarta");
        assert_eq!(merged.name, "Ada");
    }

    #[test]
    fn test_empty_patch_rejected() {
        assert!(merge(student(), StudentPatch::default()).is_err());
    }
}
