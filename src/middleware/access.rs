// src/middleware/access.rs

use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::{ApiError, AppError},
    middleware::i18n::Locale,
    models::auth::{Capability, User},
};

/// What an operation demands from the principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any authenticated principal, no capability needed.
    Authenticated,
    /// At least one of the listed capabilities.
    AnyOf(&'static [Capability]),
    /// Every listed capability.
    AllOf(&'static [Capability]),
}

impl Requirement {
    pub fn is_satisfied_by(&self, user: &User) -> bool {
        match self {
            Requirement::Authenticated => true,
            Requirement::AnyOf(caps) => caps.iter().any(|cap| user.has(*cap)),
            Requirement::AllOf(caps) => caps.iter().all(|cap| user.has(*cap)),
        }
    }
}

/// 1. The trait every access rule implements
pub trait AccessRule: Send + Sync + 'static {
    fn requirement() -> Requirement;
}

/// 2. The guard extractor. Put it before any body extractor in a handler so
/// the check runs before the payload is even read.
pub struct Require<R>(pub PhantomData<R>);

impl<R, S> FromRequestParts<S> for Require<R>
where
    R: AccessRule,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_headers(&parts.headers);

        // A. The principal placed by auth_guard; no principal means no access
        let user = parts
            .extensions
            .get::<User>()
            .ok_or_else(|| AppError::NotAuthenticated.to_api_error(&locale))?;

        // B. Evaluate the declared requirement
        let requirement = R::requirement();
        if !requirement.is_satisfied_by(user) {
            tracing::warn!(
                user_id = user.id,
                ?requirement,
                path = %parts.uri.path(),
                "access denied"
            );
            return Err(AppError::Forbidden.to_api_error(&locale));
        }

        Ok(Require(PhantomData))
    }
}

// ---
// Access rules
// ---

pub struct StaffOrSuperuser;
impl AccessRule for StaffOrSuperuser {
    fn requirement() -> Requirement {
        Requirement::AnyOf(&[Capability::Staff, Capability::Superuser])
    }
}

pub struct SuperuserOnly;
impl AccessRule for SuperuserOnly {
    fn requirement() -> Requirement {
        Requirement::AllOf(&[Capability::Superuser])
    }
}

pub struct AnyAuthenticated;
impl AccessRule for AnyAuthenticated {
    fn requirement() -> Requirement {
        Requirement::Authenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn principal(is_staff: bool, is_superuser: bool) -> User {
        User {
            id: 7,
            username: "dispatcher".into(),
            password_hash: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            is_staff,
            is_superuser,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn staff_or_superuser_accepts_either_capability() {
        let rule = StaffOrSuperuser::requirement();
        assert!(rule.is_satisfied_by(&principal(true, false)));
        assert!(rule.is_satisfied_by(&principal(false, true)));
        assert!(rule.is_satisfied_by(&principal(true, true)));
        assert!(!rule.is_satisfied_by(&principal(false, false)));
    }

    #[test]
    fn superuser_only_rejects_staff() {
        let rule = SuperuserOnly::requirement();
        assert!(!rule.is_satisfied_by(&principal(true, false)));
        assert!(rule.is_satisfied_by(&principal(false, true)));
    }

    #[test]
    fn all_of_needs_every_capability() {
        let rule = Requirement::AllOf(&[Capability::Staff, Capability::Superuser]);
        assert!(!rule.is_satisfied_by(&principal(true, false)));
        assert!(rule.is_satisfied_by(&principal(true, true)));
    }

    #[test]
    fn authenticated_needs_no_capability() {
        assert!(AnyAuthenticated::requirement().is_satisfied_by(&principal(false, false)));
    }
}
