// src/db/request_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::{
    common::{
        db_utils::{delete_row, reference_error},
        error::{AppError, Entity},
    },
    models::{
        request::{CreateRequestPayload, Request, RequestStatus, RequestViewRow},
        task::{RequestTask, TaskStatus, TaskViewRow},
    },
};

const REQUEST_SELECT: &str = r#"
    SELECT id, text, photo, created_at, status, resident_id AS resident,
           address_id AS address, apartment
    FROM requests
"#;

const REQUEST_VIEW_SELECT: &str = r#"
    SELECT r.id, r.text, r.photo, r.created_at, r.status, r.apartment,
           res.name AS resident_name, res.surname AS resident_surname,
           res.patronymic AS resident_patronymic,
           s.name AS street, b.number, b.block,
           hc.name AS complex_name, hc.office_id AS office_id
    FROM requests r
    JOIN residents res ON res.id = r.resident_id
    JOIN houses h ON h.id = r.address_id
    JOIN buildings b ON b.id = h.address_id
    JOIN streets s ON s.id = b.street_id
    JOIN housing_complexes hc ON hc.id = h.complex_id
"#;

const TASK_VIEW_SELECT: &str = r#"
    SELECT t.id, t.request_id AS request, t.status,
           e.name AS employee_name, e.patronymic AS employee_patronymic,
           sv.name AS service_name, sv.description AS service_description
    FROM request_tasks t
    JOIN employees e ON e.id = t.employee_id
    JOIN services sv ON sv.id = t.service_id
"#;

// Requests and their tasks
#[derive(Clone)]
pub struct RequestRepository {
    pool: SqlitePool,
}

impl RequestRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  REQUESTS
    // =========================================================================

    /// Requests whose status is one of `statuses`, oldest first.
    pub async fn list_by_statuses(&self, statuses: &[RequestStatus]) -> Result<Vec<RequestViewRow>, AppError> {
        let mut builder = QueryBuilder::<Sqlite>::new(REQUEST_VIEW_SELECT);
        builder.push(" WHERE r.status IN (");
        let mut separated = builder.separated(", ");
        for status in statuses {
            separated.push_bind(*status);
        }
        separated.push_unseparated(") ORDER BY r.id");

        let rows = builder
            .build_query_as::<RequestViewRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_for_resident(&self, tg_id: i64) -> Result<Vec<RequestViewRow>, AppError> {
        let sql = format!("{REQUEST_VIEW_SELECT} WHERE res.tg_id = ? ORDER BY r.id");
        let rows = sqlx::query_as::<_, RequestViewRow>(&sql)
            .bind(tg_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_view(&self, id: i64) -> Result<Option<RequestViewRow>, AppError> {
        let sql = format!("{REQUEST_VIEW_SELECT} WHERE r.id = ?");
        let row = sqlx::query_as::<_, RequestViewRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find(&self, id: i64) -> Result<Option<Request>, AppError> {
        let sql = format!("{REQUEST_SELECT} WHERE id = ?");
        let request = sqlx::query_as::<_, Request>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(request)
    }

    pub async fn create(
        &self,
        input: &CreateRequestPayload,
        created_at: DateTime<Utc>,
    ) -> Result<Request, AppError> {
        sqlx::query_as::<_, Request>(
            r#"
            INSERT INTO requests (text, photo, created_at, status, resident_id, address_id, apartment)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, text, photo, created_at, status, resident_id AS resident,
                      address_id AS address, apartment
            "#,
        )
        .bind(&input.text)
        .bind(&input.photo)
        .bind(created_at)
        .bind(input.status.unwrap_or(RequestStatus::New))
        .bind(input.resident)
        .bind(input.address)
        .bind(&input.apartment)
        .fetch_one(&self.pool)
        .await
        .map_err(reference_error)
    }

    /// Overwrites the fields that are `Some`. Returns false when the request
    /// does not exist.
    pub async fn update(
        &self,
        id: i64,
        status: Option<RequestStatus>,
        photo: Option<&str>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE requests
            SET status = COALESCE(?, status), photo = COALESCE(?, photo)
            WHERE id = ?
            "#,
        )
        .bind(status)
        .bind(photo)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  TASKS
    // =========================================================================

    pub async fn tasks_of_request(&self, request_id: i64) -> Result<Vec<TaskViewRow>, AppError> {
        let sql = format!("{TASK_VIEW_SELECT} WHERE t.request_id = ? ORDER BY t.id");
        let rows = sqlx::query_as::<_, TaskViewRow>(&sql)
            .bind(request_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Tasks of the employee bound to chat `tg_id` in one of `statuses`.
    pub async fn tasks_for_employee_chat(
        &self,
        tg_id: i64,
        statuses: &[TaskStatus],
    ) -> Result<Vec<TaskViewRow>, AppError> {
        let mut builder = QueryBuilder::<Sqlite>::new(TASK_VIEW_SELECT);
        builder.push(" WHERE e.tg_id = ");
        builder.push_bind(tg_id);
        builder.push(" AND t.status IN (");
        let mut separated = builder.separated(", ");
        for status in statuses {
            separated.push_bind(*status);
        }
        separated.push_unseparated(") ORDER BY t.id");

        let rows = builder
            .build_query_as::<TaskViewRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_task_view(&self, id: i64) -> Result<Option<TaskViewRow>, AppError> {
        let sql = format!("{TASK_VIEW_SELECT} WHERE t.id = ?");
        let row = sqlx::query_as::<_, TaskViewRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create_task(
        &self,
        request_id: i64,
        employee_id: i64,
        service_id: i64,
        status: TaskStatus,
    ) -> Result<RequestTask, AppError> {
        sqlx::query_as::<_, RequestTask>(
            r#"
            INSERT INTO request_tasks (request_id, employee_id, service_id, status)
            VALUES (?, ?, ?, ?)
            RETURNING id, request_id AS request, employee_id AS employee,
                      service_id AS service, status
            "#,
        )
        .bind(request_id)
        .bind(employee_id)
        .bind(service_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(reference_error)
    }

    pub async fn update_task(
        &self,
        id: i64,
        status: Option<TaskStatus>,
        request_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE request_tasks
            SET status = COALESCE(?, status), request_id = COALESCE(?, request_id)
            WHERE id = ?
            "#,
        )
        .bind(status)
        .bind(request_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(reference_error)?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), AppError> {
        delete_row(&self.pool, "request_tasks", id, Entity::Task).await
    }
}
