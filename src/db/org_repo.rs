// src/db/org_repo.rs

use sqlx::SqlitePool;

use crate::{
    common::{
        db_utils::{delete_row, reference_error},
        error::{AppError, Entity},
    },
    models::org::{
        CreateEmployeePayload, Department, Employee, Office, Position, Service,
    },
};

const EMPLOYEE_SELECT: &str = r#"
    SELECT id, name, surname, patronymic, position_id AS position,
           office_id AS office, tg_id
    FROM employees
"#;

// Offices, departments, positions, employees and the service catalog
#[derive(Clone)]
pub struct OrgRepository {
    pool: SqlitePool,
}

impl OrgRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  OFFICES
    // =========================================================================

    pub async fn list_offices(&self) -> Result<Vec<Office>, AppError> {
        let offices = sqlx::query_as::<_, Office>(
            r#"
            SELECT id, name, address_id AS address, work_schedule_id AS work_schedule
            FROM offices
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(offices)
    }

    pub async fn create_office(
        &self,
        name: &str,
        address_id: i64,
        work_schedule_id: Option<i64>,
    ) -> Result<Office, AppError> {
        sqlx::query_as::<_, Office>(
            r#"
            INSERT INTO offices (name, address_id, work_schedule_id)
            VALUES (?, ?, ?)
            RETURNING id, name, address_id AS address, work_schedule_id AS work_schedule
            "#,
        )
        .bind(name)
        .bind(address_id)
        .bind(work_schedule_id)
        .fetch_one(&self.pool)
        .await
        .map_err(reference_error)
    }

    pub async fn delete_office(&self, id: i64) -> Result<(), AppError> {
        delete_row(&self.pool, "offices", id, Entity::Office).await
    }

    // =========================================================================
    //  DEPARTMENTS & POSITIONS
    // =========================================================================

    pub async fn list_departments(&self) -> Result<Vec<Department>, AppError> {
        let departments =
            sqlx::query_as::<_, Department>("SELECT id, name FROM departments ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(departments)
    }

    pub async fn create_department(&self, name: &str) -> Result<Department, AppError> {
        let department = sqlx::query_as::<_, Department>(
            "INSERT INTO departments (name) VALUES (?) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(department)
    }

    pub async fn delete_department(&self, id: i64) -> Result<(), AppError> {
        delete_row(&self.pool, "departments", id, Entity::Department).await
    }

    pub async fn list_positions(&self) -> Result<Vec<Position>, AppError> {
        let positions = sqlx::query_as::<_, Position>(
            "SELECT id, name, department_id AS department FROM positions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(positions)
    }

    pub async fn create_position(&self, name: &str, department_id: i64) -> Result<Position, AppError> {
        sqlx::query_as::<_, Position>(
            r#"
            INSERT INTO positions (name, department_id)
            VALUES (?, ?)
            RETURNING id, name, department_id AS department
            "#,
        )
        .bind(name)
        .bind(department_id)
        .fetch_one(&self.pool)
        .await
        .map_err(reference_error)
    }

    pub async fn delete_position(&self, id: i64) -> Result<(), AppError> {
        delete_row(&self.pool, "positions", id, Entity::Position).await
    }

    // =========================================================================
    //  EMPLOYEES
    // =========================================================================

    pub async fn list_employees(&self) -> Result<Vec<Employee>, AppError> {
        let sql = format!("{EMPLOYEE_SELECT} ORDER BY id");
        let employees = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }

    /// Employees holding `position_id` in `office_id`.
    pub async fn employees_for(&self, position_id: i64, office_id: i64) -> Result<Vec<Employee>, AppError> {
        let sql = format!("{EMPLOYEE_SELECT} WHERE position_id = ? AND office_id = ? ORDER BY id");
        let employees = sqlx::query_as::<_, Employee>(&sql)
            .bind(position_id)
            .bind(office_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }

    pub async fn create_employee(&self, input: &CreateEmployeePayload) -> Result<Employee, AppError> {
        sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (name, surname, patronymic, position_id, office_id, tg_id)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, name, surname, patronymic, position_id AS position,
                      office_id AS office, tg_id
            "#,
        )
        .bind(&input.name)
        .bind(&input.surname)
        .bind(&input.patronymic)
        .bind(input.position)
        .bind(input.office)
        .bind(input.tg_id)
        .fetch_one(&self.pool)
        .await
        .map_err(reference_error)
    }

    pub async fn delete_employee(&self, id: i64) -> Result<(), AppError> {
        delete_row(&self.pool, "employees", id, Entity::Employee).await
    }

    // =========================================================================
    //  SERVICES
    // =========================================================================

    pub async fn list_services(&self) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>(
            "SELECT id, name, description, position_id AS position FROM services ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(services)
    }

    pub async fn create_service(
        &self,
        name: &str,
        description: &str,
        position_id: i64,
    ) -> Result<Service, AppError> {
        sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (name, description, position_id)
            VALUES (?, ?, ?)
            RETURNING id, name, description, position_id AS position
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(position_id)
        .fetch_one(&self.pool)
        .await
        .map_err(reference_error)
    }

    pub async fn delete_service(&self, id: i64) -> Result<(), AppError> {
        delete_row(&self.pool, "services", id, Entity::Service).await
    }
}
