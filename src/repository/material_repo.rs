//! Learning material and attachment repositories

use super::insert_error;
use crate::{error::AppError, models::material::*};
use sqlx::PgPool;

/// 学习资料附带科目
const SELECT_LEARNING_MATERIAL: &str = r#"
    SELECT t.*, to_jsonb(su) AS subject
    FROM learning_materials t
    JOIN subjects su ON su.subject_id = t.subject_id
"#;

/// 附件附带学习资料
const SELECT_ATTACHMENT: &str = r#"
    SELECT t.*, to_jsonb(lm) AS learning_material
    FROM attachments t
    JOIN learning_materials lm ON lm.learning_material_id = t.learning_material_id
"#;

pub struct LearningMaterialRepository {
    db: PgPool,
}

impl LearningMaterialRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        req: &CreateLearningMaterialRequest,
    ) -> Result<LearningMaterial, AppError> {
        sqlx::query_as::<_, LearningMaterial>(
            r#"
            INSERT INTO learning_materials (subject_id, content)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(req.subject_id)
        .bind(&req.content)
        .fetch_one(&self.db)
        .await
        .map_err(insert_error)
    }

    pub async fn list(&self) -> Result<Vec<LearningMaterial>, AppError> {
        let materials = sqlx::query_as::<_, LearningMaterial>(
            &format!("{} ORDER BY t.learning_material_id", SELECT_LEARNING_MATERIAL),
        )
        .fetch_all(&self.db)
        .await?;

        Ok(materials)
    }

    pub async fn list_by_subject(&self, subject_id: i64) -> Result<Vec<LearningMaterial>, AppError> {
        let materials = sqlx::query_as::<_, LearningMaterial>(
            &format!("{} WHERE t.subject_id = $1 ORDER BY t.learning_material_id", SELECT_LEARNING_MATERIAL),
        )
        .bind(subject_id)
        .fetch_all(&self.db)
        .await?;

        Ok(materials)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<LearningMaterial>, AppError> {
        let material = sqlx::query_as::<_, LearningMaterial>(
            &format!("{} WHERE t.learning_material_id = $1", SELECT_LEARNING_MATERIAL),
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(material)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM learning_materials WHERE learning_material_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(exists)
    }

    pub async fn update(&self, material: &LearningMaterial) -> Result<Option<LearningMaterial>, AppError> {
        let updated = sqlx::query_as::<_, LearningMaterial>(
            r#"
            UPDATE learning_materials
            SET content = $2, updated_at = NOW()
            WHERE learning_material_id = $1
            RETURNING *
            "#,
        )
        .bind(material.learning_material_id)
        .bind(&material.content)
        .fetch_optional(&self.db)
        .await?;

        Ok(updated)
    }

    /// 附件随资料级联删除
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM learning_materials WHERE learning_material_id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub struct AttachmentRepository {
    db: PgPool,
}

impl AttachmentRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, req: &CreateAttachmentRequest) -> Result<Attachment, AppError> {
        sqlx::query_as::<_, Attachment>(
            r#"
            INSERT INTO attachments (learning_material_id, source, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(req.learning_material_id)
        .bind(&req.source)
        .bind(&req.description)
        .fetch_one(&self.db)
        .await
        .map_err(insert_error)
    }

    pub async fn list(&self) -> Result<Vec<Attachment>, AppError> {
        let attachments =
            sqlx::query_as::<_, Attachment>(&format!("{} ORDER BY t.attachment_id", SELECT_ATTACHMENT))
                .fetch_all(&self.db)
                .await?;

        Ok(attachments)
    }

    pub async fn list_by_learning_material(
        &self,
        learning_material_id: i64,
    ) -> Result<Vec<Attachment>, AppError> {
        let attachments = sqlx::query_as::<_, Attachment>(
            &format!("{} WHERE t.learning_material_id = $1 ORDER BY t.attachment_id", SELECT_ATTACHMENT),
        )
        .bind(learning_material_id)
        .fetch_all(&self.db)
        .await?;

        Ok(attachments)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Attachment>, AppError> {
        let attachment =
            sqlx::query_as::<_, Attachment>(&format!("{} WHERE t.attachment_id = $1", SELECT_ATTACHMENT))
                .bind(id)
                .fetch_optional(&self.db)
                .await?;

        Ok(attachment)
    }

    pub async fn update(&self, attachment: &Attachment) -> Result<Option<Attachment>, AppError> {
        let updated = sqlx::query_as::<_, Attachment>(
            r#"
            UPDATE attachments
            SET source = $2, description = $3, updated_at = NOW()
            WHERE attachment_id = $1
            RETURNING *
            "#,
        )
        .bind(attachment.attachment_id)
        .bind(&attachment.source)
        .bind(&attachment.description)
        .fetch_optional(&self.db)
        .await?;

        Ok(updated)
    }
}
