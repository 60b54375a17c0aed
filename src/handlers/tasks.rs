// src/handlers/tasks.rs

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
        access::{Require, StaffOrSuperuser},
        i18n::Locale,
    },
    models::task::{CreateTaskPayload, TaskDetail, UpdateTaskPayload},
};

async fn apply_update(
    app_state: &AppState,
    locale: &Locale,
    id: i64,
    payload: UpdateTaskPayload,
) -> Result<Json<TaskDetail>, ApiError> {
    let task = app_state
        .task_service
        .update(id, &payload)
        .await
        .map_err(|e| e.to_api_error(locale))?;

    Ok(Json(task))
}

// GET /api/v1/task/{id}
pub async fn get_task(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
    WithRejection(Path(id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let task = app_state
        .task_service
        .detail(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(task)))
}

// PUT /api/v1/task/{id}
pub async fn put_task(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
    WithRejection(Path(id), _): PathParam<i64>,
    WithRejection(Json(payload), _): JsonBody<UpdateTaskPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .ensure_complete()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    apply_update(&app_state, &locale, id, payload).await
}

// PATCH /api/v1/task/{id}
pub async fn patch_task(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
    WithRejection(Path(id), _): PathParam<i64>,
    WithRejection(Json(payload), _): JsonBody<UpdateTaskPayload>,
) -> Result<impl IntoResponse, ApiError> {
    apply_update(&app_state, &locale, id, payload).await
}

// POST /api/v1/task/create
pub async fn create_task(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
    WithRejection(Json(payload), _): JsonBody<CreateTaskPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let task = app_state
        .task_service
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(task)))
}

// DELETE /api/v1/task/delete/{id}
pub async fn delete_task(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
    WithRejection(Path(id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .task_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/v1/tasks/for-master/{chat_id}
pub async fn tasks_for_master(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
    WithRejection(Path(chat_id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let tasks = app_state
        .task_service
        .tasks_for_master(chat_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(tasks)))
}
