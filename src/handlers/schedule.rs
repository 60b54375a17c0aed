// src/handlers/schedule.rs

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
    models::schedule::{CreateSchedulePayload, UpdateWorkDayPayload},
};

// GET /api/v1/schedule/
pub async fn list_schedules(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let schedules = app_state
        .schedule_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(schedules)))
}

// GET /api/v1/schedule/{id}
pub async fn get_schedule(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Path(id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let schedule = app_state
        .schedule_service
        .detail(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(schedule)))
}

// POST /api/v1/schedule/create/
pub async fn create_schedule(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Json(payload), _): JsonBody<CreateSchedulePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let schedule = app_state
        .schedule_service
        .create(payload.name.trim())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(schedule)))
}

// DELETE /api/v1/schedule/delete/{id}
pub async fn delete_schedule(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Path(id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .schedule_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/v1/schedule/workday/manage/{id}
pub async fn get_work_day(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Path(id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let day = app_state
        .schedule_service
        .work_day(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(day)))
}

// PUT /api/v1/schedule/workday/manage/{id}
pub async fn put_work_day(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Path(id), _): PathParam<i64>,
    WithRejection(Json(payload), _): JsonBody<UpdateWorkDayPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .ensure_complete()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let day = app_state
        .schedule_service
        .update_work_day(id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(day)))
}

// PATCH /api/v1/schedule/workday/manage/{id}
pub async fn patch_work_day(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Path(id), _): PathParam<i64>,
    WithRejection(Json(payload), _): JsonBody<UpdateWorkDayPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let day = app_state
        .schedule_service
        .update_work_day(id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(day)))
}
