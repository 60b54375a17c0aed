// src/models/request.rs

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{address::building_short, org::full_name};

// =============================================================================
//  STATUS
// =============================================================================

/// Lifecycle state of a request. Stored as the integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "i64", into = "i64")]
#[repr(i64)]
pub enum RequestStatus {
    New = 1,
    Accepted = 2,
    InProgress = 3,
    Completed = 4,
    Cancelled = 5,
}

/// Dashboard bucket a status belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusBucket {
    New,
    Active,
    /// Terminal states; listed separately instead of disappearing.
    Closed,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 5] = [
        RequestStatus::New,
        RequestStatus::Accepted,
        RequestStatus::InProgress,
        RequestStatus::Completed,
        RequestStatus::Cancelled,
    ];

    // code, display name, bucket
    fn entry(self) -> (i64, &'static str, StatusBucket) {
        match self {
            RequestStatus::New => (1, "Новая", StatusBucket::New),
            RequestStatus::Accepted => (2, "Принята", StatusBucket::Active),
            RequestStatus::InProgress => (3, "В работе", StatusBucket::Active),
            RequestStatus::Completed => (4, "Выполнена", StatusBucket::Closed),
            RequestStatus::Cancelled => (5, "Отменена", StatusBucket::Closed),
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        RequestStatus::ALL.into_iter().find(|status| status.code() == code)
    }

    pub fn code(self) -> i64 {
        self.entry().0
    }

    pub fn name(self) -> &'static str {
        self.entry().1
    }

    pub fn bucket(self) -> StatusBucket {
        self.entry().2
    }
}

impl TryFrom<i64> for RequestStatus {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        RequestStatus::from_code(code).ok_or_else(|| format!("unknown request status {code}"))
    }
}

impl From<RequestStatus> for i64 {
    fn from(status: RequestStatus) -> Self {
        status.code()
    }
}

impl StatusBucket {
    pub fn statuses(self) -> Vec<RequestStatus> {
        RequestStatus::ALL
            .into_iter()
            .filter(|status| status.bucket() == self)
            .collect()
    }
}

// =============================================================================
//  RECORDS AND VIEWS
// =============================================================================

/// "DD.MM.YYYY HH:MM" in the display offset.
pub fn display_date(ts: DateTime<Utc>, offset: FixedOffset) -> String {
    ts.with_timezone(&offset).format("%d.%m.%Y %H:%M").to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Request {
    pub id: i64,
    pub text: String,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub status: RequestStatus,
    pub resident: i64,
    pub address: i64,
    pub apartment: Option<String>,
}

// Request joined with everything its views print
#[derive(Debug, Clone, FromRow)]
pub struct RequestViewRow {
    pub id: i64,
    pub text: String,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub status: RequestStatus,
    pub apartment: Option<String>,
    pub resident_name: String,
    pub resident_surname: String,
    pub resident_patronymic: String,
    pub street: String,
    pub number: String,
    pub block: Option<String>,
    pub complex_name: String,
    pub office_id: i64,
}

impl RequestViewRow {
    fn building(&self) -> String {
        building_short(&self.street, &self.number, self.block.as_deref())
    }
}

// Dashboard card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestShortInfo {
    pub id: i64,
    pub date: String,
    pub address: String,
    pub info: String,
}

impl RequestShortInfo {
    pub fn from_row(row: RequestViewRow, offset: FixedOffset) -> Self {
        Self {
            id: row.id,
            date: display_date(row.created_at, offset),
            address: row.building(),
            info: row.text,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestDetail {
    pub id: i64,
    pub info: String,
    pub date: String,
    pub status_name: String,
    pub status: RequestStatus,
    pub resident: String,
    pub address: String,
    pub complex: String,
    pub photo: Option<String>,
    pub office_id: i64,
}

impl RequestDetail {
    pub fn from_row(row: RequestViewRow, offset: FixedOffset) -> Self {
        let address = match row.apartment.as_deref().filter(|a| !a.trim().is_empty()) {
            Some(apartment) => format!("{}, кв. {}", row.building(), apartment),
            None => row.building(),
        };

        Self {
            id: row.id,
            info: row.text,
            date: display_date(row.created_at, offset),
            status_name: row.status.name().to_string(),
            status: row.status,
            resident: full_name(&row.resident_surname, &row.resident_name, &row.resident_patronymic),
            address,
            complex: row.complex_name,
            photo: row.photo,
            office_id: row.office_id,
        }
    }
}

// =============================================================================
//  PAYLOADS
// =============================================================================

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateRequestPayload {
    #[validate(length(min = 1, max = 4000))]
    pub text: String,
    #[validate(length(max = 500))]
    pub photo: Option<String>,
    pub status: Option<RequestStatus>,
    pub resident: i64,
    pub address: i64,
    #[validate(length(max = 10))]
    pub apartment: Option<String>,
}

// Staff-editable part of a request. PUT needs `status`, PATCH takes any subset.
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct UpdateRequestPayload {
    pub status: Option<RequestStatus>,
    #[validate(length(max = 500))]
    pub photo: Option<String>,
}

impl UpdateRequestPayload {
    pub fn ensure_complete(&self) -> Result<(), ValidationErrors> {
        if self.status.is_none() {
            let mut errors = ValidationErrors::new();
            errors.add("status", ValidationError::new("required"));
            return Err(errors);
        }
        Ok(())
    }
}
