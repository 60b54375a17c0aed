// src/db/user_repo.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    common::{
        db_utils::{delete_row, unique_or_reference_error},
        error::{AppError, Entity},
    },
    models::auth::{CreateUserPayload, User},
};

const USER_SELECT: &str = r#"
    SELECT id, username, password_hash, first_name, last_name,
           is_staff, is_superuser, created_at
    FROM users
"#;

// Principals of the API: admin panel accounts and the bots
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let sql = format!("{USER_SELECT} WHERE username = ?");
        let maybe_user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("{USER_SELECT} WHERE id = ?");
        let maybe_user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    /// Everyone but the account with id `hidden_id`.
    pub async fn list_except(&self, hidden_id: i64) -> Result<Vec<User>, AppError> {
        let sql = format!("{USER_SELECT} WHERE id <> ? ORDER BY id");
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(hidden_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // The password arrives already hashed
    pub async fn create_user(
        &self,
        input: &CreateUserPayload,
        password_hash: &str,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, first_name, last_name,
                               is_staff, is_superuser, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, username, password_hash, first_name, last_name,
                      is_staff, is_superuser, created_at
            "#,
        )
        .bind(&input.username)
        .bind(password_hash)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(input.is_staff)
        .bind(input.is_superuser)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_or_reference_error(e, AppError::UsernameTaken))
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        delete_row(&self.pool, "users", id, Entity::User).await
    }
}
