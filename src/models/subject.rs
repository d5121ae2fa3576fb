//! Subject and enrollment models

use super::{interest::Interest, student::Student, Related};
use super::patch::{set, Patch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Subject
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subject {
    pub subject_id: i64,
    pub subject_name: String,
    pub description: String,
    pub interest_id: i64,
    pub prerequisite_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest: Related<Interest>,
}

/// Create subject request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubjectRequest {
    #[validate(length(min = 1, max = 255, message = "Subject name must be 1-255 characters"))]
    pub subject_name: String,
    #[serde(default)]
    pub description: String,
    pub interest_id: i64,
    pub prerequisite_id: Option<i64>,
}

/// Update subject request
#[derive(Debug, Default, Deserialize)]
pub struct SubjectPatch {
    pub description: Option<String>,
    pub prerequisite_id: Option<i64>,
}

impl Patch<Subject> for SubjectPatch {
    fn is_empty(&self) -> bool {
        self.description.is_none() && self.prerequisite_id.is_none()
    }

    fn apply_to(self, target: &mut Subject) {
        set(&mut target.description, self.description);
        if let Some(prerequisite_id) = self.prerequisite_id {
            target.prerequisite_id = Some(prerequisite_id);
        }
    }
}

/// A student's enrollment in a subject
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SubjectJoined {
    pub subject_joined_id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub date_joined: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Related<Student>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Related<Subject>,
}

/// Create enrollment request; `date_joined` is set by the server
#[derive(Debug, Deserialize)]
pub struct CreateSubjectJoinedRequest {
    pub student_id: i64,
    pub subject_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::patch::merge;

    #[test]
    fn test_prerequisite_patch() {
        let subject = Subject {
            subject_id: 2,
            subject_name: "Algebra II".to_string(),
            description: "".to_string(),
            interest_id: 1,
            prerequisite_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            interest: None,
        };

        let patch = SubjectPatch {
            description: None,
            prerequisite_id: Some(1),
        };

        let merged = merge(subject, patch).unwrap();
        assert_eq!(merged.prerequisite_id, Some(1));
        assert_eq!(merged.subject_name, "Algebra II");
    }
}
