//! 学生 HTTP 处理器

use super::{EntityId, Payload};
use crate::{
    error::AppError,
    middleware::AppState,
    models::{patch::merge, student::*},
    repository::{InterestRepository, StudentRepository},
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// 创建学生并注册登录凭证
///
/// 学生记录与凭证在同一事务、同一连接上写入：任一失败则整体回滚。
pub async fn create_student(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<CreateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if !InterestRepository::new(state.db.clone())
        .exists(req.interest_id)
        .await?
    {
        return Err(AppError::missing_reference("Interest"));
    }

    let password_hash = state.auth_service.hash_password(&req.password)?;

    let mut tx = state.db.begin().await?;
    let student = StudentRepository::insert(&mut *tx, &req).await?;
    state
        .auth_service
        .signup_in(&mut *tx, student.student_id, &password_hash)
        .await?;
    tx.commit().await?;

    tracing::info!(student_id = student.student_id, "Student created");
    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let students = StudentRepository::new(state.db.clone()).list().await?;
    Ok(Json(students))
}

pub async fn get_student(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let student = StudentRepository::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Student"))?;

    Ok(Json(student))
}

/// 更新手机号、住址
pub async fn update_student(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    Payload(patch): Payload<StudentPatch>,
) -> Result<impl IntoResponse, AppError> {
    patch.validate()?;

    let repo = StudentRepository::new(state.db.clone());
    let student = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Student"))?;

    let updated = repo
        .update(&merge(student, patch)?)
        .await?
        .ok_or_else(|| AppError::not_found("Student"))?;
    Ok(Json(updated))
}

/// 删除学生，其报名、作答和成绩级联删除
pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    if !StudentRepository::new(state.db.clone()).delete(id).await? {
        return Err(AppError::not_found("Student"));
    }

    tracing::info!(student_id = id, "Student deleted");
    Ok(Json(json!({ "message": "Student deleted" })))
}
