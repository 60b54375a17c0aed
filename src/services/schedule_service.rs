// src/services/schedule_service.rs

use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::{
    common::error::{AppError, Entity},
    db::ScheduleRepository,
    models::schedule::{
        default_hours, UpdateWorkDayPayload, WorkDayBrief, WorkDayView, WorkSchedule,
        WorkScheduleDetail, WorkScheduleSummary,
    },
};

// Saturday and Sunday
const WEEKEND: [i64; 2] = [6, 7];

#[derive(Clone)]
pub struct ScheduleService {
    repo: ScheduleRepository,
    pool: SqlitePool,
}

impl ScheduleService {
    pub fn new(repo: ScheduleRepository, pool: SqlitePool) -> Self {
        Self { repo, pool }
    }

    /// Creates a schedule together with its seven days: weekdays 09:00–18:00,
    /// weekend off. Either all eight rows are written or none.
    pub async fn create(&self, name: &str) -> Result<WorkSchedule, AppError> {
        let mut tx = self.pool.begin().await?;

        let schedule = self.repo.insert_schedule(&mut *tx, name).await?;
        for day_of_week in 1..=7 {
            self.repo
                .insert_work_day(
                    &mut *tx,
                    schedule.id,
                    day_of_week,
                    WEEKEND.contains(&day_of_week),
                    default_hours(),
                )
                .await?;
        }

        tx.commit().await?;

        tracing::info!(schedule_id = schedule.id, "work schedule created");
        Ok(schedule)
    }

    pub async fn list(&self) -> Result<Vec<WorkScheduleSummary>, AppError> {
        let schedules = self.repo.list_schedules().await?;

        let mut days_by_schedule: HashMap<i64, Vec<WorkDayBrief>> = HashMap::new();
        for day in self.repo.list_work_days().await? {
            days_by_schedule
                .entry(day.schedule)
                .or_default()
                .push(WorkDayBrief::from(&day));
        }

        Ok(schedules
            .into_iter()
            .map(|schedule| WorkScheduleSummary {
                work_days: days_by_schedule.remove(&schedule.id).unwrap_or_default(),
                id: schedule.id,
                name: schedule.name,
            })
            .collect())
    }

    pub async fn detail(&self, id: i64) -> Result<WorkScheduleDetail, AppError> {
        let schedule = self
            .repo
            .find_schedule(id)
            .await?
            .ok_or(AppError::NotFound(Entity::WorkSchedule))?;
        let days = self.repo.work_days_of(id).await?;

        Ok(WorkScheduleDetail {
            id: schedule.id,
            name: schedule.name,
            work_days: days.into_iter().map(WorkDayView::from).collect(),
        })
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.repo.delete_schedule(id).await
    }

    pub async fn work_day(&self, id: i64) -> Result<WorkDayView, AppError> {
        self.repo
            .find_work_day(id)
            .await?
            .map(WorkDayView::from)
            .ok_or(AppError::NotFound(Entity::WorkDay))
    }

    pub async fn update_work_day(
        &self,
        id: i64,
        input: UpdateWorkDayPayload,
    ) -> Result<WorkDayView, AppError> {
        let current = self
            .repo
            .find_work_day(id)
            .await?
            .ok_or(AppError::NotFound(Entity::WorkDay))?;

        let merged = input.apply(current)?;
        let saved = self.repo.update_work_day(&merged).await?;

        tracing::info!(work_day_id = id, is_not_working = saved.is_not_working, "work day updated");
        Ok(WorkDayView::from(saved))
    }
}
