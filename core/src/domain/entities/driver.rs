//! Driver entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A driver orders can be assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub id: Uuid,
    pub driver_name: String,
    pub license_number: String,
    pub phone_number: String,
    pub email: String,

    /// Only enabled drivers may receive new assignments
    pub enabled: bool,

    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub modified_by: Option<String>,
}

impl Driver {
    /// Creates a new enabled driver
    pub fn new(
        driver_name: String,
        license_number: String,
        phone_number: String,
        email: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            driver_name,
            license_number,
            phone_number,
            email,
            enabled: true,
            deleted: false,
            created_at: now,
            updated_at: now,
            modified_by: None,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.updated_at = Utc::now();
    }

    /// Case-insensitive match against name, license, phone or email
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [&self.driver_name, &self.license_number, &self.phone_number, &self.email]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}
