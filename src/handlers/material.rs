//! 学习资料与附件 HTTP 处理器

use super::{EntityId, Payload};
use crate::{
    error::AppError,
    middleware::AppState,
    models::{material::*, patch::merge},
    repository::{AttachmentRepository, LearningMaterialRepository, SubjectRepository},
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

pub async fn create_learning_material(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<CreateLearningMaterialRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if !SubjectRepository::new(state.db.clone())
        .exists(req.subject_id)
        .await?
    {
        return Err(AppError::missing_reference("Subject"));
    }

    let material = LearningMaterialRepository::new(state.db.clone())
        .create(&req)
        .await?;

    Ok((StatusCode::CREATED, Json(material)))
}

pub async fn list_learning_materials(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let materials = LearningMaterialRepository::new(state.db.clone())
        .list()
        .await?;
    Ok(Json(materials))
}

pub async fn get_learning_material(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let material = LearningMaterialRepository::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Learning Material"))?;

    Ok(Json(material))
}

pub async fn list_learning_materials_by_subject(
    State(state): State<Arc<AppState>>,
    EntityId(subject_id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let materials = LearningMaterialRepository::new(state.db.clone())
        .list_by_subject(subject_id)
        .await?;
    Ok(Json(materials))
}

pub async fn update_learning_material(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    Payload(patch): Payload<LearningMaterialPatch>,
) -> Result<impl IntoResponse, AppError> {
    let repo = LearningMaterialRepository::new(state.db.clone());
    let material = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Learning Material"))?;

    let updated = repo
        .update(&merge(material, patch)?)
        .await?
        .ok_or_else(|| AppError::not_found("Learning Material"))?;
    Ok(Json(updated))
}

pub async fn delete_learning_material(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    if !LearningMaterialRepository::new(state.db.clone())
        .delete(id)
        .await?
    {
        return Err(AppError::not_found("Learning Material"));
    }

    tracing::info!(learning_material_id = id, "Learning material deleted");
    Ok(Json(json!({ "message": "Learning Material deleted" })))
}

pub async fn create_attachment(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<CreateAttachmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if !LearningMaterialRepository::new(state.db.clone())
        .exists(req.learning_material_id)
        .await?
    {
        return Err(AppError::missing_reference("Learning Material"));
    }

    let attachment = AttachmentRepository::new(state.db.clone())
        .create(&req)
        .await?;

    Ok((StatusCode::CREATED, Json(attachment)))
}

pub async fn list_attachments(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let attachments = AttachmentRepository::new(state.db.clone()).list().await?;
    Ok(Json(attachments))
}

pub async fn list_attachments_by_learning_material(
    State(state): State<Arc<AppState>>,
    EntityId(learning_material_id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let attachments = AttachmentRepository::new(state.db.clone())
        .list_by_learning_material(learning_material_id)
        .await?;
    Ok(Json(attachments))
}

/// 更新附件链接或描述，链接需以 http:// 或 https:// 开头
pub async fn update_attachment(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    Payload(patch): Payload<AttachmentPatch>,
) -> Result<impl IntoResponse, AppError> {
    patch.validate()?;

    let repo = AttachmentRepository::new(state.db.clone());
    let attachment = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Attachment"))?;

    let updated = repo
        .update(&merge(attachment, patch)?)
        .await?
        .ok_or_else(|| AppError::not_found("Attachment"))?;
    Ok(Json(updated))
}
