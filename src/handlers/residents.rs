// src/handlers/residents.rs

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
    models::resident::{CreateResidentPayload, ResidentEntry, ResidentLookup},
};

// GET /api/v1/resident/
pub async fn list_residents(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
) -> Result<impl IntoResponse, ApiError> {
    let residents = app_state
        .resident_repo
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let entries: Vec<ResidentEntry> = residents.iter().map(ResidentEntry::from).collect();
    Ok((StatusCode::OK, Json(entries)))
}

// POST /api/v1/resident/create/
pub async fn create_resident(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
    WithRejection(Json(payload), _): JsonBody<CreateResidentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let resident = app_state
        .resident_repo
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    tracing::info!(resident_id = resident.id, "resident registered");
    Ok((StatusCode::CREATED, Json(resident)))
}

// GET /api/v1/resident/by_tgid/{chat_id}
//
// The bots branch on `exists`, so a miss answers 404 with `{exists: false}`
// rather than the generic error body.
pub async fn resident_by_chat_id(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
    WithRejection(Path(chat_id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let lookup = ResidentLookup::from(
        app_state
            .resident_repo
            .find_by_tg_id(chat_id)
            .await
            .map_err(|e| e.to_api_error(&locale))?,
    );

    let status = if lookup.exists {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    Ok((status, Json(lookup)))
}
