// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An access attribute of a principal. Capabilities are independent flags,
/// not a hierarchy: a principal may hold both or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Dispatchers and bots.
    Staff,
    /// Administrators.
    Superuser,
}

// A principal as stored in the database
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Staff => self.is_staff,
            Capability::Superuser => self.is_superuser,
        }
    }
}

// Row of the user list. `name` is None for accounts with no capability.
#[derive(Debug, Clone, Serialize)]
pub struct UserEntry {
    pub id: i64,
    pub name: Option<String>,
    pub username: String,
    pub is_superuser: bool,
    pub is_staff: bool,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserEntry {
    fn from(user: User) -> Self {
        let name = if user.is_superuser {
            Some(format!("{}: Администратор", user.username))
        } else if user.is_staff {
            Some(format!("{}: Персонал", user.username))
        } else {
            None
        };

        Self {
            id: user.id,
            name,
            username: user.username,
            is_superuser: user.is_superuser,
            is_staff: user.is_staff,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserPayload {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(length(min = 8, message = "Пароль должен содержать не менее 8 символов."))]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

// Login form
#[derive(Debug, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub auth_token: String,
}

// JWT claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,   // user id
    pub exp: usize, // expires at
    pub iat: usize, // issued at
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_staff: bool, is_superuser: bool) -> User {
        User {
            id: 2,
            username: "ivanov".into(),
            password_hash: "x".into(),
            first_name: String::new(),
            last_name: String::new(),
            is_staff,
            is_superuser,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn list_name_reflects_strongest_capability() {
        assert_eq!(
            UserEntry::from(user(true, true)).name.as_deref(),
            Some("ivanov: Администратор")
        );
        assert_eq!(
            UserEntry::from(user(true, false)).name.as_deref(),
            Some("ivanov: Персонал")
        );
        assert_eq!(UserEntry::from(user(false, false)).name, None);
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let json = serde_json::to_value(user(true, false)).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
