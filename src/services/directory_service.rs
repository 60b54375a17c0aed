// src/services/directory_service.rs

use crate::{
    common::error::{AppError, Entity},
    db::{AddressRepository, OrgRepository},
    models::{
        address::{AddressEntry, HouseEntry, Street},
        org::{EmployeeChoice, EmployeeEntry},
    },
};

/// Read models of the reference data that need more than a plain row:
/// joined labels and lookups that must 404 on a missing parent.
#[derive(Clone)]
pub struct DirectoryService {
    address_repo: AddressRepository,
    org_repo: OrgRepository,
}

impl DirectoryService {
    pub fn new(address_repo: AddressRepository, org_repo: OrgRepository) -> Self {
        Self {
            address_repo,
            org_repo,
        }
    }

    // =========================================================================
    //  ADDRESSES
    // =========================================================================

    pub async fn list_addresses(&self) -> Result<Vec<AddressEntry>, AppError> {
        let rows = self.address_repo.list_buildings().await?;
        Ok(rows.into_iter().map(AddressEntry::from).collect())
    }

    pub async fn streets_of_city(&self, city_id: i64) -> Result<Vec<Street>, AppError> {
        self.address_repo
            .find_city(city_id)
            .await?
            .ok_or(AppError::NotFound(Entity::City))?;
        self.address_repo.streets_of_city(city_id).await
    }

    pub async fn list_houses(&self) -> Result<Vec<HouseEntry>, AppError> {
        let rows = self.address_repo.list_houses().await?;
        Ok(rows.into_iter().map(HouseEntry::with_complex).collect())
    }

    pub async fn houses_of_complex(&self, complex_id: i64) -> Result<Vec<HouseEntry>, AppError> {
        self.address_repo
            .find_complex(complex_id)
            .await?
            .ok_or(AppError::NotFound(Entity::HousingComplex))?;

        let rows = self.address_repo.houses_of_complex(complex_id).await?;
        Ok(rows.into_iter().map(HouseEntry::within_complex).collect())
    }

    pub async fn create_house(&self, complex_id: i64, address_id: i64) -> Result<HouseEntry, AppError> {
        let id = self.address_repo.create_house(complex_id, address_id).await?;
        let row = self
            .address_repo
            .find_house(id)
            .await?
            .ok_or(AppError::NotFound(Entity::House))?;

        tracing::info!(house_id = id, complex_id, "house created");
        Ok(HouseEntry::with_complex(row))
    }

    // =========================================================================
    //  STAFF
    // =========================================================================

    pub async fn list_employees(&self) -> Result<Vec<EmployeeEntry>, AppError> {
        let employees = self.org_repo.list_employees().await?;
        Ok(employees.into_iter().map(EmployeeEntry::from).collect())
    }

    /// Who can be assigned a service: employees with the service's position
    /// in the office serving the request.
    pub async fn eligible_employees(
        &self,
        position_id: i64,
        office_id: i64,
    ) -> Result<Vec<EmployeeChoice>, AppError> {
        let employees = self.org_repo.employees_for(position_id, office_id).await?;
        Ok(employees.into_iter().map(EmployeeChoice::from).collect())
    }
}
