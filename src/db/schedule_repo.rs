// src/db/schedule_repo.rs

use chrono::NaiveTime;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::{
        db_utils::delete_row,
        error::{AppError, Entity},
    },
    models::schedule::{WorkDay, WorkSchedule},
};

const WORK_DAY_SELECT: &str = r#"
    SELECT id, schedule_id AS schedule, day_of_week, is_not_working, start_time, end_time
    FROM work_days
"#;

#[derive(Clone)]
pub struct ScheduleRepository {
    pool: SqlitePool,
}

impl ScheduleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_schedules(&self) -> Result<Vec<WorkSchedule>, AppError> {
        let schedules =
            sqlx::query_as::<_, WorkSchedule>("SELECT id, name FROM work_schedules ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(schedules)
    }

    pub async fn find_schedule(&self, id: i64) -> Result<Option<WorkSchedule>, AppError> {
        let schedule =
            sqlx::query_as::<_, WorkSchedule>("SELECT id, name FROM work_schedules WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(schedule)
    }

    // Part of the schedule creation transaction
    pub async fn insert_schedule<'e, E>(&self, executor: E, name: &str) -> Result<WorkSchedule, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let schedule = sqlx::query_as::<_, WorkSchedule>(
            "INSERT INTO work_schedules (name) VALUES (?) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(executor)
        .await?;
        Ok(schedule)
    }

    pub async fn insert_work_day<'e, E>(
        &self,
        executor: E,
        schedule_id: i64,
        day_of_week: i64,
        is_not_working: bool,
        hours: (NaiveTime, NaiveTime),
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO work_days (schedule_id, day_of_week, is_not_working, start_time, end_time)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(schedule_id)
        .bind(day_of_week)
        .bind(is_not_working)
        .bind(hours.0)
        .bind(hours.1)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Every work day, grouped by schedule and ordered Monday first.
    pub async fn list_work_days(&self) -> Result<Vec<WorkDay>, AppError> {
        let sql = format!("{WORK_DAY_SELECT} ORDER BY schedule_id, day_of_week");
        let days = sqlx::query_as::<_, WorkDay>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(days)
    }

    pub async fn work_days_of(&self, schedule_id: i64) -> Result<Vec<WorkDay>, AppError> {
        let sql = format!("{WORK_DAY_SELECT} WHERE schedule_id = ? ORDER BY day_of_week");
        let days = sqlx::query_as::<_, WorkDay>(&sql)
            .bind(schedule_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(days)
    }

    pub async fn find_work_day(&self, id: i64) -> Result<Option<WorkDay>, AppError> {
        let sql = format!("{WORK_DAY_SELECT} WHERE id = ?");
        let day = sqlx::query_as::<_, WorkDay>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(day)
    }

    /// Writes the hours of a day. `day_of_week` and `schedule_id` are never touched.
    pub async fn update_work_day(&self, day: &WorkDay) -> Result<WorkDay, AppError> {
        sqlx::query_as::<_, WorkDay>(
            r#"
            UPDATE work_days
            SET is_not_working = ?, start_time = ?, end_time = ?
            WHERE id = ?
            RETURNING id, schedule_id AS schedule, day_of_week, is_not_working, start_time, end_time
            "#,
        )
        .bind(day.is_not_working)
        .bind(day.start_time)
        .bind(day.end_time)
        .bind(day.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound(Entity::WorkDay))
    }

    // Work days go with the schedule (ON DELETE CASCADE)
    pub async fn delete_schedule(&self, id: i64) -> Result<(), AppError> {
        delete_row(&self.pool, "work_schedules", id, Entity::WorkSchedule).await
    }
}
