// src/common/error.rs

use std::collections::HashMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use thiserror::Error;

use crate::{
    common::i18n::{self, Lang, MessageKey},
    middleware::i18n::Locale,
};

/// The kinds of records an error can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    City,
    Building,
    HousingComplex,
    House,
    Office,
    Department,
    Position,
    Employee,
    Service,
    WorkSchedule,
    WorkDay,
    Request,
    Task,
    User,
    BotSettings,
}

// Domain error, independent of the caller's language.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("authentication credentials were not provided")]
    NotAuthenticated,

    #[error("invalid token")]
    InvalidToken,

    #[error("missing capability")]
    Forbidden,

    #[error("{0:?} not found")]
    NotFound(Entity),

    #[error("{0:?} still has dependent records")]
    HasDependents(Entity),

    #[error("referenced record does not exist")]
    ReferenceNotFound,

    #[error("resident chat id already registered")]
    DuplicateChatId,

    #[error("username already taken")]
    UsernameTaken,

    #[error("database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("jwt error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

/// What the HTTP caller actually receives: a status, a localized `detail`
/// and, for validation failures, per-field messages.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
    pub errors: Option<HashMap<String, Vec<String>>>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a HashMap<String, Vec<String>>>,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
            errors: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: &self.detail,
            errors: self.errors.as_ref(),
        };
        (self.status, Json(body)).into_response()
    }
}

/// JSON body whose parse failures come back as a 400 in the error format
/// used everywhere else.
pub type JsonBody<T> = WithRejection<Json<T>, ApiError>;

/// Path segments and query strings get the same treatment.
pub type PathParam<T> = WithRejection<Path<T>, ApiError>;
pub type QueryParams<T> = WithRejection<Query<T>, ApiError>;

// Rejections run before the `Locale` extractor, so they speak the default
// language. The parser's own message goes to `non_field_errors`.
fn rejected(status: StatusCode, key: MessageKey, reason: String) -> ApiError {
    let lang = Locale::default().lang();
    let mut errors = HashMap::new();
    errors.insert("non_field_errors".to_string(), vec![reason]);
    ApiError {
        status,
        detail: i18n::text(lang, key).to_string(),
        errors: Some(errors),
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        rejected(StatusCode::BAD_REQUEST, MessageKey::InvalidPayload, rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        let status = if rejection.status().is_server_error() {
            rejection.status()
        } else {
            StatusCode::BAD_REQUEST
        };
        rejected(status, MessageKey::InvalidParameters, rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        rejected(StatusCode::BAD_REQUEST, MessageKey::InvalidParameters, rejection.body_text())
    }
}

impl AppError {
    pub fn to_api_error(&self, locale: &Locale) -> ApiError {
        let lang = locale.lang();

        match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| i18n::field_message(lang, &e.code, e.message.as_deref()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    detail: i18n::text(lang, MessageKey::InvalidPayload).to_string(),
                    errors: Some(details),
                }
            }
            AppError::InvalidCredentials => {
                ApiError::new(StatusCode::UNAUTHORIZED, i18n::text(lang, MessageKey::InvalidCredentials))
            }
            AppError::NotAuthenticated => {
                ApiError::new(StatusCode::UNAUTHORIZED, i18n::text(lang, MessageKey::NotAuthenticated))
            }
            AppError::InvalidToken => {
                ApiError::new(StatusCode::UNAUTHORIZED, i18n::text(lang, MessageKey::InvalidToken))
            }
            AppError::Forbidden => {
                ApiError::new(StatusCode::FORBIDDEN, i18n::text(lang, MessageKey::Forbidden))
            }
            AppError::NotFound(entity) => ApiError::new(
                StatusCode::NOT_FOUND,
                with_entity(lang, MessageKey::NotFound, *entity),
            ),
            AppError::HasDependents(entity) => ApiError::new(
                StatusCode::CONFLICT,
                with_entity(lang, MessageKey::HasDependents, *entity),
            ),
            AppError::ReferenceNotFound => {
                ApiError::new(StatusCode::BAD_REQUEST, i18n::text(lang, MessageKey::ReferenceNotFound))
            }
            AppError::DuplicateChatId => {
                ApiError::new(StatusCode::CONFLICT, i18n::text(lang, MessageKey::DuplicateChatId))
            }
            AppError::UsernameTaken => {
                ApiError::new(StatusCode::CONFLICT, i18n::text(lang, MessageKey::UsernameTaken))
            }

            // Everything else is masked as a 500; the real cause only goes to the log.
            e => {
                tracing::error!("Internal server error: {}", e);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, i18n::text(lang, MessageKey::Internal))
            }
        }
    }
}

fn with_entity(lang: Lang, key: MessageKey, entity: Entity) -> String {
    format!("{}: {}.", i18n::text(lang, key), i18n::entity_label(lang, entity))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn not_found_names_the_entity() {
        let err = AppError::NotFound(Entity::Request).to_api_error(&Locale::default());
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.detail, "Объект не найден: заявка.");
    }

    #[test]
    fn validation_errors_are_localized_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("name", ValidationError::new("required"));

        let err = AppError::ValidationError(errors).to_api_error(&Locale("en".into()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        let fields = err.errors.expect("field errors");
        assert_eq!(fields["name"], vec!["This field is required.".to_string()]);
    }

    #[test]
    fn restricted_delete_is_a_conflict() {
        let err = AppError::HasDependents(Entity::City).to_api_error(&Locale::default());
        assert_eq!(err.status, StatusCode::CONFLICT);
    }
}
