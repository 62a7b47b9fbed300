use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use om_core::domain::entities::Driver;
use om_core::services::NewDriver;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(min = 1, max = 150, message = "Driver name is required"))]
    pub driver_name: String,
    #[validate(length(min = 1, max = 50, message = "License number is required"))]
    pub license_number: String,
    #[validate(length(min = 1, max = 30, message = "Phone number is required"))]
    pub phone_number: String,
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
}

impl From<CreateDriverRequest> for NewDriver {
    fn from(request: CreateDriverRequest) -> Self {
        NewDriver {
            driver_name: request.driver_name,
            license_number: request.license_number,
            phone_number: request.phone_number,
            email: request.email,
        }
    }
}

/// Body of `PATCH /drivers/{id}/status`; a missing flag enables the driver
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToggleDriverStatusRequest {
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DriverSearchQuery {
    pub q: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverResponse {
    pub id: Uuid,
    pub driver_name: String,
    pub license_number: String,
    pub phone_number: String,
    pub email: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub modified_by: Option<String>,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.id,
            driver_name: driver.driver_name,
            license_number: driver.license_number,
            phone_number: driver.phone_number,
            email: driver.email,
            enabled: driver.enabled,
            created_at: driver.created_at,
            updated_at: driver.updated_at,
            modified_by: driver.modified_by,
        }
    }
}

/// Driver as embedded in an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverSummary {
    pub id: Uuid,
    pub driver_name: String,
    pub license_number: String,
    pub phone_number: String,
    pub enabled: bool,
}

impl From<Driver> for DriverSummary {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.id,
            driver_name: driver.driver_name,
            license_number: driver.license_number,
            phone_number: driver.phone_number,
            enabled: driver.enabled,
        }
    }
}
