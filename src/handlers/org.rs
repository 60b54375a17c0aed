// src/handlers/org.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError, JsonBody, PathParam, QueryParams},
    config::AppState,
    middleware::{
        access::{Require, StaffOrSuperuser, SuperuserOnly},
        i18n::Locale,
    },
    models::org::{
        CreateDepartmentPayload, CreateEmployeePayload, CreateOfficePayload,
        CreatePositionPayload, CreateServicePayload, EmployeeSearch,
    },
};

// =============================================================================
//  OFFICES
// =============================================================================

// GET /api/v1/office/
pub async fn list_offices(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let offices = app_state
        .org_repo
        .list_offices()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(offices)))
}

// POST /api/v1/office/create/
pub async fn create_office(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Json(payload), _): JsonBody<CreateOfficePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let office = app_state
        .org_repo
        .create_office(payload.name.trim(), payload.address, payload.work_schedule)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(office)))
}

// DELETE /api/v1/office/delete/{id}
pub async fn delete_office(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Path(id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .org_repo
        .delete_office(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  DEPARTMENTS & POSITIONS
// =============================================================================

// GET /api/v1/department/
pub async fn list_departments(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let departments = app_state
        .org_repo
        .list_departments()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(departments)))
}

// POST /api/v1/department/create/
pub async fn create_department(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Json(payload), _): JsonBody<CreateDepartmentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let department = app_state
        .org_repo
        .create_department(payload.name.trim())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(department)))
}

// DELETE /api/v1/department/delete/{id}
pub async fn delete_department(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Path(id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .org_repo
        .delete_department(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/v1/position/
pub async fn list_positions(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let positions = app_state
        .org_repo
        .list_positions()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(positions)))
}

// POST /api/v1/position/create/
pub async fn create_position(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Json(payload), _): JsonBody<CreatePositionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let position = app_state
        .org_repo
        .create_position(payload.name.trim(), payload.department)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(position)))
}

// DELETE /api/v1/position/delete/{id}
pub async fn delete_position(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Path(id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .org_repo
        .delete_position(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  EMPLOYEES
// =============================================================================

// GET /api/v1/employee/
pub async fn list_employees(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let employees = app_state
        .directory_service
        .list_employees()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(employees)))
}

// POST /api/v1/employee/create/
pub async fn create_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Json(payload), _): JsonBody<CreateEmployeePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let employee = app_state
        .org_repo
        .create_employee(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(employee)))
}

// DELETE /api/v1/employee/delete/{id}
pub async fn delete_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Path(id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .org_repo
        .delete_employee(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  SERVICES (typical jobs)
// =============================================================================

// GET /api/v1/service/
pub async fn list_services(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
) -> Result<impl IntoResponse, ApiError> {
    let services = app_state
        .org_repo
        .list_services()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(services)))
}

// GET /api/v1/service/employees/?position_pk=&office_pk=
pub async fn service_employees(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<StaffOrSuperuser>,
    WithRejection(Query(search), _): QueryParams<EmployeeSearch>,
) -> Result<impl IntoResponse, ApiError> {
    let employees = app_state
        .directory_service
        .eligible_employees(search.position_pk, search.office_pk)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(employees)))
}

// POST /api/v1/service/create/
pub async fn create_service(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Json(payload), _): JsonBody<CreateServicePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let service = app_state
        .org_repo
        .create_service(payload.name.trim(), &payload.description, payload.position)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(service)))
}

// DELETE /api/v1/service/delete/{id}
pub async fn delete_service(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: Require<SuperuserOnly>,
    WithRejection(Path(id), _): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .org_repo
        .delete_service(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
