// src/handlers/users.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError, JsonBody, PathParam},
    config::AppState,
    middleware::{
        access::{Require, SuperuserOnly},
        i18n::Locale,
    },
    models::auth::{CreateUserPayload, UserEntry},
};

/// The account created at install time. It is never listed.
pub const BOOTSTRAP_USER_ID: i64 = 1;

// GET /api/v1/user/
pub async fn list_users(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let users = app_state
        .user_repo
        .list_except(BOOTSTRAP_USER_ID)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let entries: Vec<UserEntry> = users.into_iter().map(UserEntry::from).collect();
    Ok((StatusCode::OK, Json(entries)))
}

// POST /api/v1/user/create/
pub async fn create_user(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Json(payload), _): JsonBody<CreateUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let user = app_state
        .auth_service
        .create_user(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(user)))
}

// DELETE /api/v1/user/delete/{id}
pub async fn delete_user(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Path(id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .user_repo
        .delete_user(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
