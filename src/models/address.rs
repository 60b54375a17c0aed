// src/models/address.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// ---
// Display helpers
// ---

/// "Ленина, д. 5" or "Ленина, д. 5, корп. 2".
pub fn building_short(street: &str, number: &str, block: Option<&str>) -> String {
    match block.filter(|b| !b.trim().is_empty()) {
        Some(block) => format!("{street}, д. {number}, корп. {block}"),
        None => format!("{street}, д. {number}"),
    }
}

/// Same as [`building_short`], prefixed with the city.
pub fn building_with_city(city: &str, street: &str, number: &str, block: Option<&str>) -> String {
    format!("{city}, {}", building_short(street, number, block))
}

// ---
// Records
// ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct City {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Street {
    pub id: i64,
    pub city: i64,
    pub name: String,
}

// A building ("address"). Residential or not, it is the physical location.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Building {
    pub id: i64,
    pub street: i64,
    pub number: String,
    pub block: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct HousingComplex {
    pub id: i64,
    pub name: String,
    pub office: i64,
}

// ---
// Joined rows and list views
// ---

#[derive(Debug, Clone, FromRow)]
pub struct BuildingLabelRow {
    pub id: i64,
    pub city: String,
    pub street: String,
    pub number: String,
    pub block: Option<String>,
}

// Entry of the address list: {id, name}
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddressEntry {
    pub id: i64,
    pub name: String,
}

impl From<BuildingLabelRow> for AddressEntry {
    fn from(row: BuildingLabelRow) -> Self {
        Self {
            id: row.id,
            name: building_with_city(&row.city, &row.street, &row.number, row.block.as_deref()),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct HouseLabelRow {
    pub id: i64,
    pub complex: i64,
    pub address: i64,
    pub complex_name: String,
    pub street: String,
    pub number: String,
    pub block: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HouseEntry {
    pub id: i64,
    pub name: String,
    pub complex: i64,
    pub address: i64,
}

impl HouseEntry {
    /// Full label: "ЖК Северный, Ленина, д. 5".
    pub fn with_complex(row: HouseLabelRow) -> Self {
        let building = building_short(&row.street, &row.number, row.block.as_deref());
        Self {
            id: row.id,
            name: format!("{}, {}", row.complex_name, building),
            complex: row.complex,
            address: row.address,
        }
    }

    /// Short label used inside a complex, where the complex name is implied.
    pub fn within_complex(row: HouseLabelRow) -> Self {
        Self {
            id: row.id,
            name: building_short(&row.street, &row.number, row.block.as_deref()),
            complex: row.complex,
            address: row.address,
        }
    }
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateCityPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateStreetPayload {
    pub city: i64,
    #[validate(length(min = 1, max = 150))]
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateBuildingPayload {
    pub street: i64,
    #[validate(length(min = 1, max = 20))]
    pub number: String,
    #[validate(length(max = 20))]
    pub block: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateComplexPayload {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    pub office: i64,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateHousePayload {
    pub complex: i64,
    pub address: i64,
}
