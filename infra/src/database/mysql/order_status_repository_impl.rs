//! MySQL implementation of the OrderStatusRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use om_core::domain::entities::OrderStatus;
use om_core::errors::DomainError;
use om_core::repositories::OrderStatusRepository;

use super::{column, query_error, uuid_column};

const SELECT_STATUS: &str = r#"
    SELECT id, status_label, enabled, created_at, updated_at
    FROM order_statuses
"#;

/// MySQL implementation of OrderStatusRepository
pub struct MySqlOrderStatusRepository {
    pool: MySqlPool,
}

impl MySqlOrderStatusRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_status(row: &MySqlRow) -> Result<OrderStatus, DomainError> {
        Ok(OrderStatus {
            id: uuid_column(row, "id")?,
            status_label: column(row, "status_label")?,
            enabled: column(row, "enabled")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl OrderStatusRepository for MySqlOrderStatusRepository {
    async fn find_by_label(&self, label: &str) -> Result<Option<OrderStatus>, DomainError> {
        let query = format!("{} WHERE status_label = ? AND enabled = TRUE LIMIT 1", SELECT_STATUS);
        let row = sqlx::query(&query)
            .bind(label)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to find order status", e))?;

        row.as_ref().map(Self::row_to_status).transpose()
    }

    async fn find_all_active(&self) -> Result<Vec<OrderStatus>, DomainError> {
        let query = format!(
            "{} WHERE enabled = TRUE \
             ORDER BY FIELD(status_label, 'CREATED', 'ASSIGNED', 'IN_TRANSIT', 'DELIVERED', 'CANCELLED') = 0, \
             FIELD(status_label, 'CREATED', 'ASSIGNED', 'IN_TRANSIT', 'DELIVERED', 'CANCELLED'), status_label",
            SELECT_STATUS
        );
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("Failed to list order statuses", e))?;

        rows.iter().map(Self::row_to_status).collect()
    }

    async fn exists_by_label(&self, label: &str) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_statuses WHERE status_label = ?")
            .bind(label)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("Failed to check order status", e))?;
        Ok(count > 0)
    }

    async fn save(&self, status: OrderStatus) -> Result<OrderStatus, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO order_statuses (id, status_label, enabled, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE enabled = VALUES(enabled), updated_at = VALUES(updated_at)
            "#,
        )
        .bind(status.id.to_string())
        .bind(&status.status_label)
        .bind(status.enabled)
        .bind(status.created_at)
        .bind(status.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to save order status", e))?;

        Ok(status)
    }
}
