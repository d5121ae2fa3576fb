//! 测验 HTTP 处理器

use super::{EntityId, Payload};
use crate::{
    error::AppError,
    middleware::AppState,
    models::{patch::merge, question::QuestionPatch, quiz::*},
    repository::{
        QuizAnswerRepository, QuizRepository, QuizResultRepository, StudentRepository,
        SubjectRepository,
    },
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

pub async fn create_quiz(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if !SubjectRepository::new(state.db.clone())
        .exists(req.subject_id)
        .await?
    {
        return Err(AppError::missing_reference("Subject"));
    }

    let quiz = QuizRepository::new(state.db.clone()).create(&req).await?;
    Ok((StatusCode::CREATED, Json(quiz)))
}

pub async fn list_quizzes(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let quizzes = QuizRepository::new(state.db.clone()).list().await?;
    Ok(Json(quizzes))
}

pub async fn get_quiz(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let quiz = QuizRepository::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Quiz"))?;

    Ok(Json(quiz))
}

pub async fn list_quizzes_by_subject(
    State(state): State<Arc<AppState>>,
    EntityId(subject_id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let quizzes = QuizRepository::new(state.db.clone())
        .list_by_subject(subject_id)
        .await?;
    Ok(Json(quizzes))
}

pub async fn update_quiz(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    Payload(patch): Payload<QuestionPatch>,
) -> Result<impl IntoResponse, AppError> {
    let repo = QuizRepository::new(state.db.clone());
    let quiz = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Quiz"))?;

    let updated = repo
        .update(&merge(quiz, patch)?)
        .await?
        .ok_or_else(|| AppError::not_found("Quiz"))?;
    Ok(Json(updated))
}

pub async fn create_quiz_answer(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<CreateQuizAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !QuizRepository::new(state.db.clone())
        .exists(req.quiz_id)
        .await?
    {
        return Err(AppError::missing_reference("Quiz"));
    }
    if !StudentRepository::new(state.db.clone())
        .exists(req.student_id)
        .await?
    {
        return Err(AppError::missing_reference("Student"));
    }

    let answer = QuizAnswerRepository::new(state.db.clone())
        .create(&req)
        .await?;

    Ok((StatusCode::CREATED, Json(answer)))
}

pub async fn list_quiz_answers(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let answers = QuizAnswerRepository::new(state.db.clone()).list().await?;
    Ok(Json(answers))
}

pub async fn list_quiz_answers_by_student(
    State(state): State<Arc<AppState>>,
    EntityId(student_id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let answers = QuizAnswerRepository::new(state.db.clone())
        .list_by_student(student_id)
        .await?;
    Ok(Json(answers))
}

pub async fn list_quiz_answers_by_quiz(
    State(state): State<Arc<AppState>>,
    EntityId(quiz_id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let answers = QuizAnswerRepository::new(state.db.clone())
        .list_by_quiz(quiz_id)
        .await?;
    Ok(Json(answers))
}

pub async fn create_quiz_result(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<CreateQuizResultRequest>,
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

    let result = QuizResultRepository::new(state.db.clone())
        .create(&req)
        .await?;

    Ok((StatusCode::CREATED, Json(result)))
}

pub async fn list_quiz_results(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let results = QuizResultRepository::new(state.db.clone()).list().await?;
    Ok(Json(results))
}

pub async fn list_quiz_results_by_student(
    State(state): State<Arc<AppState>>,
    EntityId(student_id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let results = QuizResultRepository::new(state.db.clone())
        .list_by_student(student_id)
        .await?;
    Ok(Json(results))
}

pub async fn list_quiz_results_by_subject(
    State(state): State<Arc<AppState>>,
    EntityId(subject_id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let results = QuizResultRepository::new(state.db.clone())
        .list_by_subject(subject_id)
        .await?;
    Ok(Json(results))
}
