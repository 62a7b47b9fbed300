//! MySQL implementation of the DriverRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use om_core::domain::entities::Driver;
use om_core::errors::DomainError;
use om_core::repositories::DriverRepository;

use super::{column, query_error, uuid_column};

const SELECT_DRIVER: &str = r#"
    SELECT id, driver_name, license_number, phone_number, email,
           enabled, deleted, created_at, updated_at, modified_by
    FROM drivers
"#;

/// MySQL implementation of DriverRepository
pub struct MySqlDriverRepository {
    pool: MySqlPool,
}

impl MySqlDriverRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub(crate) fn row_to_driver(row: &MySqlRow) -> Result<Driver, DomainError> {
        Ok(Driver {
            id: uuid_column(row, "id")?,
            driver_name: column(row, "driver_name")?,
            license_number: column(row, "license_number")?,
            phone_number: column(row, "phone_number")?,
            email: column(row, "email")?,
            enabled: column(row, "enabled")?,
            deleted: column(row, "deleted")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
            modified_by: column(row, "modified_by")?,
        })
    }

    async fn exists_where(&self, column_name: &str, value: &str) -> Result<bool, DomainError> {
        // column_name is always one of the fixed names below, never user input
        let query = format!("SELECT COUNT(*) FROM drivers WHERE {} = ?", column_name);
        let count: i64 = sqlx::query_scalar(&query)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("Failed to check driver uniqueness", e))?;
        Ok(count > 0)
    }

    async fn fetch_many(&self, query: &str, bind: Option<String>) -> Result<Vec<Driver>, DomainError> {
        let mut q = sqlx::query(query);
        if let Some(value) = bind {
            q = q.bind(value.clone()).bind(value.clone()).bind(value.clone()).bind(value);
        }
        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("Failed to list drivers", e))?;
        rows.iter().map(Self::row_to_driver).collect()
    }
}

#[async_trait]
impl DriverRepository for MySqlDriverRepository {
    async fn create(&self, driver: Driver) -> Result<Driver, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO drivers (
                id, driver_name, license_number, phone_number, email,
                enabled, deleted, created_at, updated_at, modified_by
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(driver.id.to_string())
        .bind(&driver.driver_name)
        .bind(&driver.license_number)
        .bind(&driver.phone_number)
        .bind(&driver.email)
        .bind(driver.enabled)
        .bind(driver.deleted)
        .bind(driver.created_at)
        .bind(driver.updated_at)
        .bind(&driver.modified_by)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to create driver", e))?;

        Ok(driver)
    }

    async fn update(&self, driver: Driver) -> Result<Driver, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE drivers SET
                driver_name = ?, license_number = ?, phone_number = ?, email = ?,
                enabled = ?, deleted = ?, updated_at = ?, modified_by = ?
            WHERE id = ?
            "#,
        )
        .bind(&driver.driver_name)
        .bind(&driver.license_number)
        .bind(&driver.phone_number)
        .bind(&driver.email)
        .bind(driver.enabled)
        .bind(driver.deleted)
        .bind(driver.updated_at)
        .bind(&driver.modified_by)
        .bind(driver.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to update driver", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("Driver not found with ID: {}", driver.id)));
        }
        Ok(driver)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, DomainError> {
        let query = format!("{} WHERE id = ? AND deleted = FALSE LIMIT 1", SELECT_DRIVER);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to find driver", e))?;
        row.as_ref().map(Self::row_to_driver).transpose()
    }

    async fn find_by_name(&self, driver_name: &str) -> Result<Option<Driver>, DomainError> {
        let query = format!("{} WHERE driver_name = ? AND deleted = FALSE LIMIT 1", SELECT_DRIVER);
        let row = sqlx::query(&query)
            .bind(driver_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to find driver", e))?;
        row.as_ref().map(Self::row_to_driver).transpose()
    }

    async fn exists_by_name(&self, driver_name: &str) -> Result<bool, DomainError> {
        self.exists_where("driver_name", driver_name).await
    }

    async fn exists_by_license_number(&self, license_number: &str) -> Result<bool, DomainError> {
        self.exists_where("license_number", license_number).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        self.exists_where("email", email).await
    }

    async fn exists_by_phone_number(&self, phone_number: &str) -> Result<bool, DomainError> {
        self.exists_where("phone_number", phone_number).await
    }

    async fn find_all_active(&self) -> Result<Vec<Driver>, DomainError> {
        let query = format!(
            "{} WHERE enabled = TRUE AND deleted = FALSE ORDER BY driver_name",
            SELECT_DRIVER
        );
        self.fetch_many(&query, None).await
    }

    async fn search(&self, query: &str) -> Result<Vec<Driver>, DomainError> {
        let sql = format!(
            "{} WHERE deleted = FALSE AND (LOWER(driver_name) LIKE ? OR LOWER(license_number) LIKE ? \
             OR LOWER(phone_number) LIKE ? OR LOWER(email) LIKE ?) ORDER BY driver_name",
            SELECT_DRIVER
        );
        self.fetch_many(&sql, Some(like_pattern(query))).await
    }
}

/// `%needle%`, lowercased, with LIKE wildcards in the input escaped
pub(crate) fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Nim"), "%nim%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
