// src/services/request_service.rs

use chrono::{FixedOffset, Utc};

use crate::{
    common::error::{AppError, Entity},
    db::RequestRepository,
    models::{
        request::{
            CreateRequestPayload, Request, RequestDetail, RequestShortInfo, StatusBucket,
            UpdateRequestPayload,
        },
        task::TaskEntry,
    },
};

#[derive(Clone)]
pub struct RequestService {
    repo: RequestRepository,
    display_offset: FixedOffset,
}

impl RequestService {
    pub fn new(repo: RequestRepository, display_offset: FixedOffset) -> Self {
        Self {
            repo,
            display_offset,
        }
    }

    /// Dashboard list of one bucket, in insertion order.
    pub async fn list_bucket(&self, bucket: StatusBucket) -> Result<Vec<RequestShortInfo>, AppError> {
        let rows = self.repo.list_by_statuses(&bucket.statuses()).await?;
        Ok(rows
            .into_iter()
            .map(|row| RequestShortInfo::from_row(row, self.display_offset))
            .collect())
    }

    pub async fn detail(&self, id: i64) -> Result<RequestDetail, AppError> {
        let row = self
            .repo
            .find_view(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Request))?;
        Ok(RequestDetail::from_row(row, self.display_offset))
    }

    pub async fn update(&self, id: i64, input: &UpdateRequestPayload) -> Result<RequestDetail, AppError> {
        let updated = self
            .repo
            .update(id, input.status, input.photo.as_deref())
            .await?;
        if !updated {
            return Err(AppError::NotFound(Entity::Request));
        }

        tracing::info!(request_id = id, status = ?input.status, "request updated");
        self.detail(id).await
    }

    pub async fn create(&self, input: &CreateRequestPayload) -> Result<Request, AppError> {
        let request = self.repo.create(input, Utc::now()).await?;
        tracing::info!(request_id = request.id, resident_id = request.resident, "request created");
        Ok(request)
    }

    /// Requests filed from the chat `tg_id`. Unknown chats get an empty list.
    pub async fn list_for_resident(&self, tg_id: i64) -> Result<Vec<RequestDetail>, AppError> {
        let rows = self.repo.list_for_resident(tg_id).await?;
        Ok(rows
            .into_iter()
            .map(|row| RequestDetail::from_row(row, self.display_offset))
            .collect())
    }

    pub async fn list_tasks(&self, request_id: i64) -> Result<Vec<TaskEntry>, AppError> {
        self.repo
            .find(request_id)
            .await?
            .ok_or(AppError::NotFound(Entity::Request))?;

        let rows = self.repo.tasks_of_request(request_id).await?;
        Ok(rows.into_iter().map(TaskEntry::from).collect())
    }
}
