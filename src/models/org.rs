// src/models/org.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// "Surname Name Patronymic", trimmed when the patronymic is empty.
pub fn full_name(surname: &str, name: &str, patronymic: &str) -> String {
    format!("{surname} {name} {patronymic}").trim().to_string()
}

/// Polite form used when addressing staff: "Name Patronymic".
pub fn respectful_name(name: &str, patronymic: &str) -> String {
    format!("{name} {patronymic}").trim().to_string()
}

// Management office ("УК")
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Office {
    pub id: i64,
    pub name: String,
    pub address: i64,
    pub work_schedule: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Department {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Position {
    pub id: i64,
    pub name: String,
    pub department: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub patronymic: String,
    pub position: i64,
    pub office: i64,
    pub tg_id: Option<i64>,
}

// Row of the employee list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeEntry {
    pub id: i64,
    pub name: String,
    pub empl_name: String,
    pub empl_surname: String,
}

impl From<Employee> for EmployeeEntry {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            name: full_name(&e.surname, &e.name, &e.patronymic),
            empl_name: e.name,
            empl_surname: e.surname,
        }
    }
}

// Candidate returned by the service/employees search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmployeeChoice {
    pub id: i64,
    pub name: String,
}

impl From<Employee> for EmployeeChoice {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            name: full_name(&e.surname, &e.name, &e.patronymic),
        }
    }
}

/// A typical job ("типовая задача") and the position eligible to perform it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub position: i64,
}

#[derive(Debug, Deserialize)]
pub struct EmployeeSearch {
    pub position_pk: i64,
    pub office_pk: i64,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateOfficePayload {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    pub address: i64,
    pub work_schedule: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateDepartmentPayload {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreatePositionPayload {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    pub department: i64,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateEmployeePayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub surname: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub patronymic: String,
    pub position: i64,
    pub office: i64,
    pub tg_id: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateServicePayload {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub position: i64,
}
