// src/models/settings.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError, ValidationErrors};

/// Telegram bot tokens. One logical row; the bots read it at startup.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct BotSettings {
    pub id: i64,
    pub resident_bot_token: String,
    pub staff_bot_token: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateBotSettingsPayload {
    #[validate(length(max = 255))]
    pub resident_bot_token: Option<String>,
    #[validate(length(max = 255))]
    pub staff_bot_token: Option<String>,
}

impl UpdateBotSettingsPayload {
    // PUT replaces both tokens
    pub fn ensure_complete(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.resident_bot_token.is_none() {
            errors.add("resident_bot_token", ValidationError::new("required"));
        }
        if self.staff_bot_token.is_none() {
            errors.add("staff_bot_token", ValidationError::new("required"));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
