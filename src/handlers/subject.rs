//! 课程与选课 HTTP 处理器

use super::{EntityId, Payload};
use crate::{
    error::AppError,
    middleware::AppState,
    models::{patch::merge, subject::*},
    repository::{InterestRepository, StudentRepository, SubjectJoinedRepository, SubjectRepository},
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

pub async fn create_subject(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<CreateSubjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if !InterestRepository::new(state.db.clone())
        .exists(req.interest_id)
        .await?
    {
        return Err(AppError::missing_reference("Interest"));
    }

    let repo = SubjectRepository::new(state.db.clone());
    if let Some(prerequisite_id) = req.prerequisite_id {
        if !repo.exists(prerequisite_id).await? {
            return Err(AppError::missing_reference("Subject"));
        }
    }

    let subject = repo.create(&req).await?;

    tracing::info!(subject_id = subject.subject_id, "Subject created");
    Ok((StatusCode::CREATED, Json(subject)))
}

pub async fn list_subjects(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let subjects = SubjectRepository::new(state.db.clone()).list().await?;
    Ok(Json(subjects))
}

pub async fn get_subject(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let subject = SubjectRepository::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Subject"))?;

    Ok(Json(subject))
}

pub async fn list_subjects_by_interest(
    State(state): State<Arc<AppState>>,
    EntityId(interest_id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let subjects = SubjectRepository::new(state.db.clone())
        .list_by_interest(interest_id)
        .await?;
    Ok(Json(subjects))
}

/// 更新描述、先修课程
pub async fn update_subject(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    Payload(patch): Payload<SubjectPatch>,
) -> Result<impl IntoResponse, AppError> {
    let repo = SubjectRepository::new(state.db.clone());
    let subject = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Subject"))?;

    if let Some(prerequisite_id) = patch.prerequisite_id {
        if prerequisite_id == id {
            return Err(AppError::validation("Subject cannot be its own prerequisite"));
        }
        if !repo.exists(prerequisite_id).await? {
            return Err(AppError::missing_reference("Subject"));
        }
    }

    let updated = repo
        .update(&merge(subject, patch)?)
        .await?
        .ok_or_else(|| AppError::not_found("Subject"))?;
    Ok(Json(updated))
}

/// 学生选课
pub async fn create_subject_joined(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<CreateSubjectJoinedRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !StudentRepository::new(state.db.clone())
        .exists(req.student_id)
        .await?
    {
        return Err(AppError::missing_reference("Student"));
    }
    if !SubjectRepository::new(state.db.clone())
        .exists(req.subject_id)
        .await?
    {
        return Err(AppError::missing_reference("Subject"));
    }

    let joined = SubjectJoinedRepository::new(state.db.clone())
        .create(&req)
        .await?;

    Ok((StatusCode::CREATED, Json(joined)))
}

pub async fn list_subjects_joined(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let rows = SubjectJoinedRepository::new(state.db.clone()).list().await?;
    Ok(Json(rows))
}

pub async fn list_subjects_joined_by_student(
    State(state): State<Arc<AppState>>,
    EntityId(student_id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let rows = SubjectJoinedRepository::new(state.db.clone())
        .list_by_student(student_id)
        .await?;
    Ok(Json(rows))
}

pub async fn list_subjects_joined_by_subject(
    State(state): State<Arc<AppState>>,
    EntityId(subject_id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let rows = SubjectJoinedRepository::new(state.db.clone())
        .list_by_subject(subject_id)
        .await?;
    Ok(Json(rows))
}
