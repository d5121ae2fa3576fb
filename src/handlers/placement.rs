//! 分级测试 HTTP 处理器

use super::{EntityId, Payload};
use crate::{
    error::AppError,
    middleware::AppState,
    models::{patch::merge, placement::*, question::QuestionPatch},
    repository::{
        InterestRepository, PlacementTestAnswerRepository, PlacementTestRepository,
        PlacementTestResultRepository, StudentRepository,
    },
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

pub async fn create_placement_test(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<CreatePlacementTestRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if !InterestRepository::new(state.db.clone())
        .exists(req.interest_id)
        .await?
    {
        return Err(AppError::missing_reference("Interest"));
    }

    let test = PlacementTestRepository::new(state.db.clone())
        .create(&req)
        .await?;

    Ok((StatusCode::CREATED, Json(test)))
}

pub async fn list_placement_tests(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let tests = PlacementTestRepository::new(state.db.clone()).list().await?;
    Ok(Json(tests))
}

pub async fn update_placement_test(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    Payload(patch): Payload<QuestionPatch>,
) -> Result<impl IntoResponse, AppError> {
    let repo = PlacementTestRepository::new(state.db.clone());
    let test = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Placement Test"))?;

    let updated = repo
        .update(&merge(test, patch)?)
        .await?
        .ok_or_else(|| AppError::not_found("Placement Test"))?;
    Ok(Json(updated))
}

/// 提交分级测试作答
pub async fn create_placement_test_answer(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<CreatePlacementTestAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !PlacementTestRepository::new(state.db.clone())
        .exists(req.placement_test_id)
        .await?
    {
        return Err(AppError::missing_reference("Placement Test"));
    }
    if !StudentRepository::new(state.db.clone())
        .exists(req.student_id)
        .await?
    {
        return Err(AppError::missing_reference("Student"));
    }

    let answer = PlacementTestAnswerRepository::new(state.db.clone())
        .create(&req)
        .await?;

    Ok((StatusCode::CREATED, Json(answer)))
}

pub async fn list_placement_test_answers(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let answers = PlacementTestAnswerRepository::new(state.db.clone())
        .list()
        .await?;
    Ok(Json(answers))
}

pub async fn list_placement_test_answers_by_student(
    State(state): State<Arc<AppState>>,
    EntityId(student_id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let answers = PlacementTestAnswerRepository::new(state.db.clone())
        .list_by_student(student_id)
        .await?;
    Ok(Json(answers))
}

pub async fn list_placement_test_answers_by_placement_test(
    State(state): State<Arc<AppState>>,
    EntityId(placement_test_id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let answers = PlacementTestAnswerRepository::new(state.db.clone())
        .list_by_placement_test(placement_test_id)
        .await?;
    Ok(Json(answers))
}

pub async fn update_placement_test_answer(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    Payload(patch): Payload<PlacementTestAnswerPatch>,
) -> Result<impl IntoResponse, AppError> {
    let repo = PlacementTestAnswerRepository::new(state.db.clone());
    let answer = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Placement Test Answer"))?;

    let updated = repo
        .update(&merge(answer, patch)?)
        .await?
        .ok_or_else(|| AppError::not_found("Placement Test Answer"))?;
    Ok(Json(updated))
}

/// 记录分级测试成绩
pub async fn create_placement_test_result(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<CreatePlacementTestResultRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !StudentRepository::new(state.db.clone())
        .exists(req.student_id)
        .await?
    {
        return Err(AppError::missing_reference("Student"));
    }
    if !InterestRepository::new(state.db.clone())
        .exists(req.interest_id)
        .await?
    {
        return Err(AppError::missing_reference("Interest"));
    }

    let result = PlacementTestResultRepository::new(state.db.clone())
        .create(&req)
        .await?;

    Ok((StatusCode::CREATED, Json(result)))
}

pub async fn list_placement_test_results(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let results = PlacementTestResultRepository::new(state.db.clone())
        .list()
        .await?;
    Ok(Json(results))
}

pub async fn list_placement_test_results_by_student(
    State(state): State<Arc<AppState>>,
    EntityId(student_id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let results = PlacementTestResultRepository::new(state.db.clone())
        .list_by_student(student_id)
        .await?;
    Ok(Json(results))
}

pub async fn list_placement_test_results_by_interest(
    State(state): State<Arc<AppState>>,
    EntityId(interest_id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let results = PlacementTestResultRepository::new(state.db.clone())
        .list_by_interest(interest_id)
        .await?;
    Ok(Json(results))
}
