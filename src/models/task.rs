// src/models/task.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::org::respectful_name;

/// Lifecycle state of a task, independent from its request's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "i64", into = "i64")]
#[repr(i64)]
pub enum TaskStatus {
    Assigned = 1,
    Accepted = 2,
    InProgress = 3,
    Done = 4,
    Cancelled = 5,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Assigned,
        TaskStatus::Accepted,
        TaskStatus::InProgress,
        TaskStatus::Done,
        TaskStatus::Cancelled,
    ];

    // code, display name, open
    fn entry(self) -> (i64, &'static str, bool) {
        match self {
            TaskStatus::Assigned => (1, "Назначена", true),
            TaskStatus::Accepted => (2, "Принята", true),
            TaskStatus::InProgress => (3, "В работе", true),
            TaskStatus::Done => (4, "Выполнена", false),
            TaskStatus::Cancelled => (5, "Отменена", false),
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        TaskStatus::ALL.into_iter().find(|status| status.code() == code)
    }

    pub fn code(self) -> i64 {
        self.entry().0
    }

    pub fn name(self) -> &'static str {
        self.entry().1
    }

    /// Open tasks are the ones still on a master's to-do list.
    pub fn is_open(self) -> bool {
        self.entry().2
    }

    pub fn open() -> Vec<TaskStatus> {
        TaskStatus::ALL.into_iter().filter(|s| s.is_open()).collect()
    }
}

impl TryFrom<i64> for TaskStatus {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        TaskStatus::from_code(code).ok_or_else(|| format!("unknown task status {code}"))
    }
}

impl From<TaskStatus> for i64 {
    fn from(status: TaskStatus) -> Self {
        status.code()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct RequestTask {
    pub id: i64,
    pub request: i64,
    pub employee: i64,
    pub service: i64,
    pub status: TaskStatus,
}

// Task joined with the employee and the service it performs
#[derive(Debug, Clone, FromRow)]
pub struct TaskViewRow {
    pub id: i64,
    pub request: i64,
    pub status: TaskStatus,
    pub employee_name: String,
    pub employee_patronymic: String,
    pub service_name: String,
    pub service_description: String,
}

// List entry: the status travels as its display name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskEntry {
    pub id: i64,
    pub employee: String,
    pub task: String,
    pub status: String,
}

impl From<TaskViewRow> for TaskEntry {
    fn from(row: TaskViewRow) -> Self {
        Self {
            id: row.id,
            employee: respectful_name(&row.employee_name, &row.employee_patronymic),
            task: row.service_name,
            status: row.status.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskDetail {
    pub id: i64,
    pub employee: String,
    pub task: String,
    pub status: TaskStatus,
    pub status_name: String,
    pub request: i64,
    pub task_description: String,
}

impl From<TaskViewRow> for TaskDetail {
    fn from(row: TaskViewRow) -> Self {
        Self {
            id: row.id,
            employee: respectful_name(&row.employee_name, &row.employee_patronymic),
            task: row.service_name,
            status: row.status,
            status_name: row.status.name().to_string(),
            request: row.request,
            task_description: row.service_description,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateTaskPayload {
    pub request: i64,
    pub employee: i64,
    pub service: i64,
    pub status: Option<TaskStatus>,
}

// PUT needs `status`, PATCH takes any subset. The assignee is fixed once the
// task exists; only the owning request can be moved.
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct UpdateTaskPayload {
    pub status: Option<TaskStatus>,
    pub request: Option<i64>,
}

impl UpdateTaskPayload {
    pub fn ensure_complete(&self) -> Result<(), ValidationErrors> {
        if self.status.is_none() {
            let mut errors = ValidationErrors::new();
            errors.add("status", ValidationError::new("required"));
            return Err(errors);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_set_is_assigned_accepted_in_progress() {
        assert_eq!(
            TaskStatus::open(),
            vec![TaskStatus::Assigned, TaskStatus::Accepted, TaskStatus::InProgress]
        );
        assert!(!TaskStatus::Done.is_open());
        assert!(!TaskStatus::Cancelled.is_open());
    }

    #[test]
    fn every_status_has_its_own_code() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::from_code(status.code()), Some(status));
            assert_eq!(status.code(), status as i64);
        }
        assert_eq!(TaskStatus::from_code(0), None);
        assert!(serde_json::from_value::<TaskStatus>(serde_json::json!(6)).is_err());
    }

    #[test]
    fn list_entry_uses_polite_name_and_status_name() {
        let entry = TaskEntry::from(TaskViewRow {
            id: 1,
            request: 10,
            status: TaskStatus::InProgress,
            employee_name: "Иван".into(),
            employee_patronymic: "Петрович".into(),
            service_name: "Замена смесителя".into(),
            service_description: String::new(),
        });
        assert_eq!(entry.employee, "Иван Петрович");
        assert_eq!(entry.status, "В работе");
    }
}
