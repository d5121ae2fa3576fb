//! Interest domain models

use super::patch::{set, Patch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Interest (learning track a student or subject belongs to)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Interest {
    pub interest_id: i64,
    pub interest_name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create interest request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInterestRequest {
    #[validate(length(min = 1, max = 255, message = "Interest name must be 1-255 characters"))]
    pub interest_name: String,
    #[serde(default)]
    pub description: String,
}

/// Update interest request
#[derive(Debug, Default, Deserialize)]
pub struct InterestPatch {
    pub description: Option<String>,
}

impl Patch<Interest> for InterestPatch {
    fn is_empty(&self) -> bool {
        self.description.is_none()
    }

    fn apply_to(self, target: &mut Interest) {
        set(&mut target.description, self.description);
    }
}
