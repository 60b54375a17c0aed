// src/handlers/address.rs

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
        access::{Require, StaffOrSuperuser, SuperuserOnly},
        i18n::Locale,
    },
    models::address::{
        CreateBuildingPayload, CreateCityPayload, CreateComplexPayload, CreateHousePayload,
        CreateStreetPayload,
    },
};

// =============================================================================
//  BUILDINGS ("address")
// =============================================================================

// GET /api/v1/address/
pub async fn list_addresses(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
) -> Result<impl IntoResponse, ApiError> {
    let addresses = app_state
        .directory_service
        .list_addresses()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(addresses)))
}

// POST /api/v1/address/create/
pub async fn create_address(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Json(payload), _): JsonBody<CreateBuildingPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let building = app_state
        .address_repo
        .create_building(payload.street, &payload.number, payload.block.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(building)))
}

// DELETE /api/v1/address/delete/{id}
pub async fn delete_address(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Path(id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .address_repo
        .delete_building(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  CITIES & STREETS
// =============================================================================

// GET /api/v1/city/
pub async fn list_cities(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let cities = app_state
        .address_repo
        .list_cities()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(cities)))
}

// GET /api/v1/city/{id}/streets
pub async fn city_streets(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Path(city_id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let streets = app_state
        .directory_service
        .streets_of_city(city_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(streets)))
}

// POST /api/v1/city/create/
pub async fn create_city(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Json(payload), _): JsonBody<CreateCityPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let city = app_state
        .address_repo
        .create_city(payload.name.trim())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(city)))
}

// POST /api/v1/street/create/
pub async fn create_street(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Json(payload), _): JsonBody<CreateStreetPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let street = app_state
        .address_repo
        .create_street(payload.city, payload.name.trim())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(street)))
}

// =============================================================================
//  HOUSING COMPLEXES & HOUSES
// =============================================================================

// GET /api/v1/complex/
pub async fn list_complexes(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
) -> Result<impl IntoResponse, ApiError> {
    let complexes = app_state
        .address_repo
        .list_complexes()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(complexes)))
}

// POST /api/v1/complex/create/
pub async fn create_complex(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Json(payload), _): JsonBody<CreateComplexPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let complex = app_state
        .address_repo
        .create_complex(payload.name.trim(), payload.office)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(complex)))
}

// DELETE /api/v1/complex/delete/{id}
pub async fn delete_complex(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Path(id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .address_repo
        .delete_complex(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/v1/complex/{id}/houses
pub async fn complex_houses(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
    WithRejection(Path(complex_id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let houses = app_state
        .directory_service
        .houses_of_complex(complex_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(houses)))
}

// GET /api/v1/house/
pub async fn list_houses(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let houses = app_state
        .directory_service
        .list_houses()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(houses)))
}

// POST /api/v1/house/create/
pub async fn create_house(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Json(payload), _): JsonBody<CreateHousePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let house = app_state
        .directory_service
        .create_house(payload.complex, payload.address)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(house)))
}

// DELETE /api/v1/house/delete/{id}
pub async fn delete_house(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Path(id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .address_repo
        .delete_house(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
