//! 兴趣方向 HTTP 处理器

use super::{EntityId, Payload};
use crate::{
    error::AppError,
    middleware::AppState,
    models::{interest::*, patch::merge},
    repository::InterestRepository,
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

/// 创建兴趣方向
pub async fn create_interest(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<CreateInterestRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let interest = InterestRepository::new(state.db.clone()).create(&req).await?;

    tracing::info!(interest_id = interest.interest_id, "Interest created");
    Ok((StatusCode::CREATED, Json(interest)))
}

pub async fn list_interests(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let interests = InterestRepository::new(state.db.clone()).list().await?;
    Ok(Json(interests))
}

pub async fn get_interest(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let interest = InterestRepository::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Interest"))?;

    Ok(Json(interest))
}

/// 更新兴趣方向（仅 description）
pub async fn update_interest(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    Payload(patch): Payload<InterestPatch>,
) -> Result<impl IntoResponse, AppError> {
    let repo = InterestRepository::new(state.db.clone());

    let interest = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Interest"))?;

    let updated = repo
        .update(&merge(interest, patch)?)
        .await?
        .ok_or_else(|| AppError::not_found("Interest"))?;
    Ok(Json(updated))
}
