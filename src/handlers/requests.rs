// src/handlers/requests.rs

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
    models::request::{
        CreateRequestPayload, RequestDetail, RequestShortInfo, StatusBucket, UpdateRequestPayload,
    },
};

async fn bucket_response(
    app_state: &AppState,
    locale: &Locale,
    bucket: StatusBucket,
) -> Result<Json<Vec<RequestShortInfo>>, ApiError> {
    let requests = app_state
        .request_service
        .list_bucket(bucket)
        .await
        .map_err(|e| e.to_api_error(locale))?;

    Ok(Json(requests))
}

async fn apply_update(
    app_state: &AppState,
    locale: &Locale,
    id: i64,
    payload: UpdateRequestPayload,
) -> Result<Json<RequestDetail>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(locale))?;

    let request = app_state
        .request_service
        .update(id, &payload)
        .await
        .map_err(|e| e.to_api_error(locale))?;

    Ok(Json(request))
}

// =============================================================================
//  DASHBOARD BUCKETS
// =============================================================================

// GET /api/v1/requests/new
pub async fn list_new(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
) -> Result<impl IntoResponse, ApiError> {
    bucket_response(&app_state, &locale, StatusBucket::New).await
}

// GET /api/v1/requests/active
pub async fn list_active(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
) -> Result<impl IntoResponse, ApiError> {
    bucket_response(&app_state, &locale, StatusBucket::Active).await
}

// GET /api/v1/requests/closed
pub async fn list_closed(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
) -> Result<impl IntoResponse, ApiError> {
    bucket_response(&app_state, &locale, StatusBucket::Closed).await
}

// GET /api/v1/requests/from-user/{chat_id}
pub async fn list_from_resident(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
    WithRejection(Path(chat_id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let requests = app_state
        .request_service
        .list_for_resident(chat_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(requests)))
}

// =============================================================================
//  SINGLE REQUEST
// =============================================================================

// GET /api/v1/request/{id}
pub async fn get_request(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
    WithRejection(Path(id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let request = app_state
        .request_service
        .detail(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(request)))
}

// PUT /api/v1/request/{id}
pub async fn put_request(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
    WithRejection(Path(id), _): PathParam<i64>,
    WithRejection(Json(payload), _): JsonBody<UpdateRequestPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .ensure_complete()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    apply_update(&app_state, &locale, id, payload).await
}

// PATCH /api/v1/request/{id}
pub async fn patch_request(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
    WithRejection(Path(id), _): PathParam<i64>,
    WithRejection(Json(payload), _): JsonBody<UpdateRequestPayload>,
) -> Result<impl IntoResponse, ApiError> {
    apply_update(&app_state, &locale, id, payload).await
}

// GET /api/v1/request/{id}/tasks
pub async fn request_tasks(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
    WithRejection(Path(id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let tasks = app_state
        .request_service
        .list_tasks(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(tasks)))
}

// POST /api/v1/request/create/
pub async fn create_request(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
    WithRejection(Json(payload), _): JsonBody<CreateRequestPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let request = app_state
        .request_service
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(request)))
}
