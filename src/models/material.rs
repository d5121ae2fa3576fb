//! Learning material and attachment models

use super::{subject::Subject, Related};
use super::patch::{set, Patch};
use super::LINK;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Learning material for a subject
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LearningMaterial {
    pub learning_material_id: i64,
    pub subject_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Related<Subject>,
}

/// Create learning material request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLearningMaterialRequest {
    pub subject_id: i64,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

/// Update learning material request
#[derive(Debug, Default, Deserialize)]
pub struct LearningMaterialPatch {
    pub content: Option<String>,
}

impl Patch<LearningMaterial> for LearningMaterialPatch {
    fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    fn apply_to(self, target: &mut LearningMaterial) {
        set(&mut target.content, self.content);
    }
}

/// External resource linked from a learning material
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Attachment {
    pub attachment_id: i64,
    pub learning_material_id: i64,
    pub source: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_material: Related<LearningMaterial>,
}

/// Create attachment request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAttachmentRequest {
    pub learning_material_id: i64,
    #[validate(regex(path = *LINK, message = "Source must be a link, starts with http:// or https://"))]
    pub source: String,
    #[serde(default)]
    pub description: String,
}

/// Update attachment request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AttachmentPatch {
    #[validate(regex(path = *LINK, message = "Source must be a link, starts with http:// or https://"))]
    pub source: Option<String>,
    pub description: Option<String>,
}

impl Patch<Attachment> for AttachmentPatch {
    fn is_empty(&self) -> bool {
        self.source.is_none() && self.description.is_none()
    }

    fn apply_to(self, target: &mut Attachment) {
        set(&mut target.source, self.source);
        set(&mut target.description, self.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_source_must_be_link() {
        let ok = AttachmentPatch {
            source: Some("https://example.com/slides.pdf".to_string()),
            description: None,
        };
        assert!(ok.validate().is_ok());

        let plain_http = AttachmentPatch {
            source: Some("http://example.com".to_string()),
            description: None,
        };
        assert!(plain_http.validate().is_ok());

        let bad = AttachmentPatch {
            source: Some("ftp://example.com/file".to_string()),
            description: None,
        };
        assert!(bad.validate().is_err());

        // 只更新描述时不校验 source
        let description_only = AttachmentPatch {
            source: None,
            description: Some("Week 1 slides".to_string()),
        };
        assert!(description_only.validate().is_ok());
    }

    #[test]
    fn test_create_attachment_validation() {
        let req = CreateAttachmentRequest {
            learning_material_id: 1,
            source: "slides.pdf".to_string(),
            description: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
