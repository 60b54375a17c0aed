// src/models/resident.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::org::full_name;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Resident {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub patronymic: String,
    pub phone: String,
    pub tg_id: i64,
}

impl Resident {
    pub fn display_name(&self) -> String {
        full_name(&self.surname, &self.name, &self.patronymic)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResidentEntry {
    pub id: i64,
    pub name: String,
}

impl From<&Resident> for ResidentEntry {
    fn from(r: &Resident) -> Self {
        Self {
            id: r.id,
            name: r.display_name(),
        }
    }
}

/// Answer of the chat-id lookup. The bots use `exists` to decide whether to
/// start the registration dialog, so absence is a regular answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResidentLookup {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resident: Option<ResidentEntry>,
}

impl From<Option<Resident>> for ResidentLookup {
    fn from(found: Option<Resident>) -> Self {
        Self {
            exists: found.is_some(),
            resident: found.as_ref().map(ResidentEntry::from),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateResidentPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub surname: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub patronymic: String,
    #[validate(length(min = 5, max = 20, message = "Некорректный номер телефона."))]
    pub phone: String,
    pub tg_id: i64,
}
