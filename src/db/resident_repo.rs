// src/db/resident_repo.rs

use sqlx::SqlitePool;

use crate::{
    common::{db_utils::unique_or_reference_error, error::AppError},
    models::resident::{CreateResidentPayload, Resident},
};

#[derive(Clone)]
pub struct ResidentRepository {
    pool: SqlitePool,
}

impl ResidentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Resident>, AppError> {
        let residents = sqlx::query_as::<_, Resident>(
            "SELECT id, name, surname, patronymic, phone, tg_id FROM residents ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(residents)
    }

    pub async fn find_by_tg_id(&self, tg_id: i64) -> Result<Option<Resident>, AppError> {
        let resident = sqlx::query_as::<_, Resident>(
            "SELECT id, name, surname, patronymic, phone, tg_id FROM residents WHERE tg_id = ?",
        )
        .bind(tg_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(resident)
    }

    // A second registration from the same chat is a conflict, not an upsert.
    pub async fn create(&self, input: &CreateResidentPayload) -> Result<Resident, AppError> {
        sqlx::query_as::<_, Resident>(
            r#"
            INSERT INTO residents (name, surname, patronymic, phone, tg_id)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, surname, patronymic, phone, tg_id
            "#,
        )
        .bind(&input.name)
        .bind(&input.surname)
        .bind(&input.patronymic)
        .bind(&input.phone)
        .bind(input.tg_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_or_reference_error(e, AppError::DuplicateChatId))
    }
}
