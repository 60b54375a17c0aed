// src/db/address_repo.rs

use sqlx::SqlitePool;

use crate::{
    common::{
        db_utils::{delete_row, reference_error},
        error::{AppError, Entity},
    },
    models::address::{
        Building, BuildingLabelRow, City, HouseLabelRow, HousingComplex, Street,
    },
};

const HOUSE_LABEL_SELECT: &str = r#"
    SELECT h.id, h.complex_id AS complex, h.address_id AS address,
           hc.name AS complex_name, s.name AS street, b.number, b.block
    FROM houses h
    JOIN housing_complexes hc ON hc.id = h.complex_id
    JOIN buildings b ON b.id = h.address_id
    JOIN streets s ON s.id = b.street_id
"#;

// Cities, streets, buildings, housing complexes and houses
#[derive(Clone)]
pub struct AddressRepository {
    pool: SqlitePool,
}

impl AddressRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CITIES & STREETS
    // =========================================================================

    pub async fn list_cities(&self) -> Result<Vec<City>, AppError> {
        let cities = sqlx::query_as::<_, City>("SELECT id, name FROM cities ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(cities)
    }

    pub async fn find_city(&self, id: i64) -> Result<Option<City>, AppError> {
        let city = sqlx::query_as::<_, City>("SELECT id, name FROM cities WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(city)
    }

    pub async fn create_city(&self, name: &str) -> Result<City, AppError> {
        let city = sqlx::query_as::<_, City>("INSERT INTO cities (name) VALUES (?) RETURNING id, name")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(city)
    }

    pub async fn streets_of_city(&self, city_id: i64) -> Result<Vec<Street>, AppError> {
        let streets = sqlx::query_as::<_, Street>(
            "SELECT id, city_id AS city, name FROM streets WHERE city_id = ? ORDER BY id",
        )
        .bind(city_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(streets)
    }

    pub async fn create_street(&self, city_id: i64, name: &str) -> Result<Street, AppError> {
        sqlx::query_as::<_, Street>(
            r#"
            INSERT INTO streets (city_id, name)
            VALUES (?, ?)
            RETURNING id, city_id AS city, name
            "#,
        )
        .bind(city_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(reference_error)
    }

    // =========================================================================
    //  BUILDINGS
    // =========================================================================

    pub async fn list_buildings(&self) -> Result<Vec<BuildingLabelRow>, AppError> {
        let rows = sqlx::query_as::<_, BuildingLabelRow>(
            r#"
            SELECT b.id, c.name AS city, s.name AS street, b.number, b.block
            FROM buildings b
            JOIN streets s ON s.id = b.street_id
            JOIN cities c ON c.id = s.city_id
            ORDER BY b.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_building(
        &self,
        street_id: i64,
        number: &str,
        block: Option<&str>,
    ) -> Result<Building, AppError> {
        sqlx::query_as::<_, Building>(
            r#"
            INSERT INTO buildings (street_id, number, block)
            VALUES (?, ?, ?)
            RETURNING id, street_id AS street, number, block
            "#,
        )
        .bind(street_id)
        .bind(number)
        .bind(block)
        .fetch_one(&self.pool)
        .await
        .map_err(reference_error)
    }

    pub async fn delete_building(&self, id: i64) -> Result<(), AppError> {
        delete_row(&self.pool, "buildings", id, Entity::Building).await
    }

    // =========================================================================
    //  HOUSING COMPLEXES & HOUSES
    // =========================================================================

    pub async fn list_complexes(&self) -> Result<Vec<HousingComplex>, AppError> {
        let complexes = sqlx::query_as::<_, HousingComplex>(
            "SELECT id, name, office_id AS office FROM housing_complexes ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(complexes)
    }

    pub async fn find_complex(&self, id: i64) -> Result<Option<HousingComplex>, AppError> {
        let complex = sqlx::query_as::<_, HousingComplex>(
            "SELECT id, name, office_id AS office FROM housing_complexes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(complex)
    }

    pub async fn create_complex(&self, name: &str, office_id: i64) -> Result<HousingComplex, AppError> {
        sqlx::query_as::<_, HousingComplex>(
            r#"
            INSERT INTO housing_complexes (name, office_id)
            VALUES (?, ?)
            RETURNING id, name, office_id AS office
            "#,
        )
        .bind(name)
        .bind(office_id)
        .fetch_one(&self.pool)
        .await
        .map_err(reference_error)
    }

    pub async fn delete_complex(&self, id: i64) -> Result<(), AppError> {
        delete_row(&self.pool, "housing_complexes", id, Entity::HousingComplex).await
    }

    pub async fn list_houses(&self) -> Result<Vec<HouseLabelRow>, AppError> {
        let sql = format!("{HOUSE_LABEL_SELECT} ORDER BY h.id");
        let rows = sqlx::query_as::<_, HouseLabelRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn houses_of_complex(&self, complex_id: i64) -> Result<Vec<HouseLabelRow>, AppError> {
        let sql = format!("{HOUSE_LABEL_SELECT} WHERE h.complex_id = ? ORDER BY h.id");
        let rows = sqlx::query_as::<_, HouseLabelRow>(&sql)
            .bind(complex_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_house(&self, id: i64) -> Result<Option<HouseLabelRow>, AppError> {
        let sql = format!("{HOUSE_LABEL_SELECT} WHERE h.id = ?");
        let row = sqlx::query_as::<_, HouseLabelRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Inserts a house and returns its id.
    pub async fn create_house(&self, complex_id: i64, address_id: i64) -> Result<i64, AppError> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO houses (complex_id, address_id) VALUES (?, ?) RETURNING id",
        )
        .bind(complex_id)
        .bind(address_id)
        .fetch_one(&self.pool)
        .await
        .map_err(reference_error)?;
        Ok(id)
    }

    pub async fn delete_house(&self, id: i64) -> Result<(), AppError> {
        delete_row(&self.pool, "houses", id, Entity::House).await
    }
}
