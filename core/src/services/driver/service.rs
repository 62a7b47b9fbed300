//! Driver service implementation

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Driver;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::DriverRepository;

/// Fields a caller supplies to register a driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDriver {
    pub driver_name: String,
    pub license_number: String,
    pub phone_number: String,
    pub email: String,
}

/// Registration, lookup and activation of drivers
pub struct DriverService {
    repository: Arc<dyn DriverRepository>,
}

impl DriverService {
    pub fn new(repository: Arc<dyn DriverRepository>) -> Self {
        Self { repository }
    }

    /// Registers an enabled driver
    ///
    /// Name, license number, email and phone number must each be unused.
    ///
    /// # Errors
    ///
    /// * `DomainError::Conflict` - One of the unique fields is taken
    pub async fn create_driver(&self, request: NewDriver) -> DomainResult<Driver> {
        tracing::info!(driver_name = %request.driver_name, "Creating new driver");

        if self.repository.exists_by_name(&request.driver_name).await? {
            return Err(conflict("Driver name", &request.driver_name));
        }
        if self.repository.exists_by_license_number(&request.license_number).await? {
            return Err(conflict("License number", &request.license_number));
        }
        if self.repository.exists_by_email(&request.email).await? {
            return Err(conflict("Email", &request.email));
        }
        if self.repository.exists_by_phone_number(&request.phone_number).await? {
            return Err(conflict("Phone number", &request.phone_number));
        }

        let driver = Driver::new(
            request.driver_name,
            request.license_number,
            request.phone_number,
            request.email,
        );
        let driver = self.repository.create(driver).await?;
        tracing::info!(driver_id = %driver.id, "Driver created successfully");
        Ok(driver)
    }

    pub async fn list_active_drivers(&self) -> DomainResult<Vec<Driver>> {
        tracing::debug!("Fetching all active drivers");
        self.repository.find_all_active().await
    }

    pub async fn get_driver_by_id(&self, id: Uuid) -> DomainResult<Driver> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Driver not found with ID: {}", id)))
    }

    pub async fn get_driver_by_name(&self, driver_name: &str) -> DomainResult<Driver> {
        self.repository
            .find_by_name(driver_name)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("Driver not found with name: {}", driver_name))
            })
    }

    /// Free-text search over name, license, phone and email
    pub async fn search_drivers(&self, query: &str) -> DomainResult<Vec<Driver>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DomainError::Validation {
                message: "Search query must not be empty".to_string(),
            });
        }
        tracing::debug!(%query, "Searching drivers");
        self.repository.search(query).await
    }

    /// Enables or disables a driver
    pub async fn toggle_driver_status(
        &self,
        id: Uuid,
        enabled: bool,
        modified_by: Option<&str>,
    ) -> DomainResult<Driver> {
        tracing::info!(%id, enabled, "Toggling driver status");

        let mut driver = self.get_driver_by_id(id).await?;
        driver.set_enabled(enabled);
        driver.modified_by = modified_by.map(str::to_string);

        self.repository.update(driver).await
    }
}

fn conflict(field: &str, value: &str) -> DomainError {
    DomainError::Conflict {
        message: format!("{} already exists: {}", field, value),
    }
}
