// src/services/task_service.rs

use crate::{
    common::error::{AppError, Entity},
    db::RequestRepository,
    models::task::{CreateTaskPayload, RequestTask, TaskDetail, TaskEntry, TaskStatus, UpdateTaskPayload},
};

#[derive(Clone)]
pub struct TaskService {
    repo: RequestRepository,
}

impl TaskService {
    pub fn new(repo: RequestRepository) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: &CreateTaskPayload) -> Result<RequestTask, AppError> {
        let task = self
            .repo
            .create_task(
                input.request,
                input.employee,
                input.service,
                input.status.unwrap_or(TaskStatus::Assigned),
            )
            .await?;

        tracing::info!(
            task_id = task.id,
            request_id = task.request,
            employee_id = task.employee,
            "task assigned"
        );
        Ok(task)
    }

    pub async fn detail(&self, id: i64) -> Result<TaskDetail, AppError> {
        self.repo
            .find_task_view(id)
            .await?
            .map(TaskDetail::from)
            .ok_or(AppError::NotFound(Entity::Task))
    }

    pub async fn update(&self, id: i64, input: &UpdateTaskPayload) -> Result<TaskDetail, AppError> {
        let updated = self.repo.update_task(id, input.status, input.request).await?;
        if !updated {
            return Err(AppError::NotFound(Entity::Task));
        }

        tracing::info!(task_id = id, status = ?input.status, "task updated");
        self.detail(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.repo.delete_task(id).await
    }

    /// Open tasks of the employee bound to chat `tg_id`. An unknown chat
    /// simply has no tasks.
    pub async fn tasks_for_master(&self, tg_id: i64) -> Result<Vec<TaskEntry>, AppError> {
        let rows = self
            .repo
            .tasks_for_employee_chat(tg_id, &TaskStatus::open())
            .await?;
        Ok(rows.into_iter().map(TaskEntry::from).collect())
    }
}
