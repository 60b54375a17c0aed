// src/handlers/settings.rs

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
    models::settings::{BotSettings, UpdateBotSettingsPayload},
};

async fn apply_update(
    app_state: &AppState,
    locale: &Locale,
    id: i64,
    payload: UpdateBotSettingsPayload,
) -> Result<Json<BotSettings>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(locale))?;

    let updated = app_state
        .settings_repo
        .update_settings(id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(locale))?;

    tracing::info!(settings_id = id, "bot tokens updated");
    Ok(Json(updated))
}

// GET /api/v1/bottokens/manage/{id}
pub async fn get_settings(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
    WithRejection(Path(id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let settings = app_state
        .settings_repo
        .get_settings(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(settings)))
}

// PUT /api/v1/bottokens/manage/{id}
pub async fn put_settings(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
    WithRejection(Path(id), _): PathParam<i64>,
    WithRejection(Json(payload), _): JsonBody<UpdateBotSettingsPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .ensure_complete()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    apply_update(&app_state, &locale, id, payload).await
}

// PATCH /api/v1/bottokens/manage/{id}
pub async fn patch_settings(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
    WithRejection(Path(id), _): PathParam<i64>,
    WithRejection(Json(payload), _): JsonBody<UpdateBotSettingsPayload>,
) -> Result<impl IntoResponse, ApiError> {
    apply_update(&app_state, &locale, id, payload).await
}
