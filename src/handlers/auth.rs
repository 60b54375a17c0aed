// src/handlers/auth.rs

use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError, JsonBody},
    config::AppState,
    middleware::{
        access::{AnyAuthenticated, Require},
        auth::AuthenticatedUser,
        i18n::Locale,
    },
    models::auth::{AuthResponse, LoginPayload, User},
};

// POST /auth/token/login/
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Json(payload), _): JsonBody<LoginPayload>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let auth_token = app_state
        .auth_service
        .login_user(&payload.username, &payload.password)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(AuthResponse { auth_token }))
}

// GET /auth/users/me/
pub async fn get_me(
    _guard: Require<AnyAuthenticated>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Json<User> {
    Json(user)
}
