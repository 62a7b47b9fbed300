//! Driver repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Driver;
use crate::errors::DomainError;

/// Repository trait for Driver persistence
#[async_trait]
pub trait DriverRepository: Send + Sync {
    /// Insert a new driver
    async fn create(&self, driver: Driver) -> Result<Driver, DomainError>;

    /// Persist changes to an existing driver
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No driver with that id
    async fn update(&self, driver: Driver) -> Result<Driver, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, DomainError>;

    async fn find_by_name(&self, driver_name: &str) -> Result<Option<Driver>, DomainError>;

    async fn exists_by_name(&self, driver_name: &str) -> Result<bool, DomainError>;

    async fn exists_by_license_number(&self, license_number: &str) -> Result<bool, DomainError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    async fn exists_by_phone_number(&self, phone_number: &str) -> Result<bool, DomainError>;

    /// Enabled, non-deleted drivers ordered by name
    async fn find_all_active(&self) -> Result<Vec<Driver>, DomainError>;

    /// Non-deleted drivers whose name, license, phone or email contains `query`
    async fn search(&self, query: &str) -> Result<Vec<Driver>, DomainError>;
}
