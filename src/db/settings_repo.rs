// src/db/settings_repo.rs

use sqlx::SqlitePool;

use crate::{
    common::error::{AppError, Entity},
    models::settings::{BotSettings, UpdateBotSettingsPayload},
};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_settings(&self, id: i64) -> Result<BotSettings, AppError> {
        sqlx::query_as::<_, BotSettings>(
            "SELECT id, resident_bot_token, staff_bot_token FROM bot_settings WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound(Entity::BotSettings))
    }

    // Missing fields keep their stored value
    pub async fn update_settings(
        &self,
        id: i64,
        input: &UpdateBotSettingsPayload,
    ) -> Result<BotSettings, AppError> {
        sqlx::query_as::<_, BotSettings>(
            r#"
            UPDATE bot_settings
            SET resident_bot_token = COALESCE(?, resident_bot_token),
                staff_bot_token = COALESCE(?, staff_bot_token)
            WHERE id = ?
            RETURNING id, resident_bot_token, staff_bot_token
            "#,
        )
        .bind(&input.resident_bot_token)
        .bind(&input.staff_bot_token)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound(Entity::BotSettings))
    }
}
