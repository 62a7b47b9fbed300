//! In-memory implementation of DriverRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Driver;
use crate::errors::DomainError;

use super::trait_::DriverRepository;

#[derive(Clone, Default)]
pub struct MockDriverRepository {
    drivers: Arc<RwLock<HashMap<Uuid, Driver>>>,
}

impl MockDriverRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn any(&self, predicate: impl Fn(&Driver) -> bool + Send) -> bool {
        let drivers = self.drivers.read().await;
        drivers.values().any(predicate)
    }
}

fn sorted_by_name(mut drivers: Vec<Driver>) -> Vec<Driver> {
    drivers.sort_by(|a, b| a.driver_name.cmp(&b.driver_name));
    drivers
}

#[async_trait]
impl DriverRepository for MockDriverRepository {
    async fn create(&self, driver: Driver) -> Result<Driver, DomainError> {
        let mut drivers = self.drivers.write().await;
        drivers.insert(driver.id, driver.clone());
        Ok(driver)
    }

    async fn update(&self, driver: Driver) -> Result<Driver, DomainError> {
        let mut drivers = self.drivers.write().await;
        match drivers.get_mut(&driver.id) {
            Some(existing) => {
                *existing = driver.clone();
                Ok(driver)
            }
            None => Err(DomainError::not_found(format!("Driver not found with ID: {}", driver.id))),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, DomainError> {
        let drivers = self.drivers.read().await;
        Ok(drivers.get(&id).filter(|d| !d.deleted).cloned())
    }

    async fn find_by_name(&self, driver_name: &str) -> Result<Option<Driver>, DomainError> {
        let drivers = self.drivers.read().await;
        Ok(drivers
            .values()
            .find(|d| !d.deleted && d.driver_name == driver_name)
            .cloned())
    }

    async fn exists_by_name(&self, driver_name: &str) -> Result<bool, DomainError> {
        Ok(self.any(|d| d.driver_name == driver_name).await)
    }

    async fn exists_by_license_number(&self, license_number: &str) -> Result<bool, DomainError> {
        Ok(self.any(|d| d.license_number == license_number).await)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.any(|d| d.email == email).await)
    }

    async fn exists_by_phone_number(&self, phone_number: &str) -> Result<bool, DomainError> {
        Ok(self.any(|d| d.phone_number == phone_number).await)
    }

    async fn find_all_active(&self) -> Result<Vec<Driver>, DomainError> {
        let drivers = self.drivers.read().await;
        Ok(sorted_by_name(
            drivers.values().filter(|d| d.enabled && !d.deleted).cloned().collect(),
        ))
    }

    async fn search(&self, query: &str) -> Result<Vec<Driver>, DomainError> {
        let drivers = self.drivers.read().await;
        Ok(sorted_by_name(
            drivers.values().filter(|d| !d.deleted && d.matches(query)).cloned().collect(),
        ))
    }
}
