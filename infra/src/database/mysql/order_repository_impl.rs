//! MySQL implementation of the OrderRepository trait.
//!
//! Orders are always read through one joined SELECT so the status, driver,
//! attachment and creator come back with the order row. Joined columns are
//! aliased with a table prefix (`status_`, `driver_`, ...).

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use om_core::domain::entities::{Attachment, AttachmentType, Driver, Order, OrderStatus, UserSummary};
use om_core::errors::DomainError;
use om_core::repositories::{OrderFilter, OrderRepository};
use om_shared::Pagination;

use super::driver_repository_impl::like_pattern;
use super::{column, optional_uuid_column, query_error, uuid_column};

const SELECT_ORDER: &str = r#"
    SELECT o.id, o.order_number, o.origin, o.destination, o.distance_km,
           o.estimated_duration_minutes, o.enabled, o.deleted,
           o.created_at, o.updated_at, o.modified_by,
           s.id AS status_id, s.status_label AS status_label, s.enabled AS status_enabled,
           s.created_at AS status_created_at, s.updated_at AS status_updated_at,
           d.id AS driver_id, d.driver_name AS driver_name, d.license_number AS driver_license_number,
           d.phone_number AS driver_phone_number, d.email AS driver_email,
           d.enabled AS driver_enabled, d.deleted AS driver_deleted,
           d.created_at AS driver_created_at, d.updated_at AS driver_updated_at,
           d.modified_by AS driver_modified_by,
           a.id AS attachment_id, a.file_name AS attachment_file_name,
           a.file_path AS attachment_file_path, a.file_size_bytes AS attachment_file_size_bytes,
           a.enabled AS attachment_enabled, a.created_at AS attachment_created_at,
           a.updated_at AS attachment_updated_at,
           t.id AS type_id, t.type_label AS type_label, t.allowed_extensions AS type_allowed_extensions,
           t.enabled AS type_enabled, t.created_at AS type_created_at, t.updated_at AS type_updated_at,
           u.id AS creator_id, u.username AS creator_username,
           CONCAT_WS(' ', NULLIF(TRIM(u.first_name), ''), NULLIF(TRIM(u.last_name), '')) AS creator_full_name
    FROM orders o
    JOIN order_statuses s ON s.id = o.order_status_id
    LEFT JOIN drivers d ON d.id = o.driver_id
    LEFT JOIN attachments a ON a.id = o.attachment_id
    LEFT JOIN attachment_types t ON t.id = a.attachment_type_id
    LEFT JOIN users u ON u.id = o.created_by_user_id
"#;

/// MySQL implementation of OrderRepository
pub struct MySqlOrderRepository {
    pool: MySqlPool,
}

impl MySqlOrderRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_order(row: &MySqlRow) -> Result<Order, DomainError> {
        let status = OrderStatus {
            id: uuid_column(row, "status_id")?,
            status_label: column(row, "status_label")?,
            enabled: column(row, "status_enabled")?,
            created_at: column(row, "status_created_at")?,
            updated_at: column(row, "status_updated_at")?,
        };

        let driver = match optional_uuid_column(row, "driver_id")? {
            Some(id) => Some(Driver {
                id,
                driver_name: column(row, "driver_name")?,
                license_number: column(row, "driver_license_number")?,
                phone_number: column(row, "driver_phone_number")?,
                email: column(row, "driver_email")?,
                enabled: column(row, "driver_enabled")?,
                deleted: column(row, "driver_deleted")?,
                created_at: column(row, "driver_created_at")?,
                updated_at: column(row, "driver_updated_at")?,
                modified_by: column(row, "driver_modified_by")?,
            }),
            None => None,
        };

        let attachment = match optional_uuid_column(row, "attachment_id")? {
            Some(id) => Some(Attachment {
                id,
                file_name: column(row, "attachment_file_name")?,
                file_path: column(row, "attachment_file_path")?,
                file_size_bytes: column(row, "attachment_file_size_bytes")?,
                attachment_type: AttachmentType {
                    id: uuid_column(row, "type_id")?,
                    type_label: column(row, "type_label")?,
                    allowed_extensions: column(row, "type_allowed_extensions")?,
                    enabled: column(row, "type_enabled")?,
                    created_at: column(row, "type_created_at")?,
                    updated_at: column(row, "type_updated_at")?,
                },
                enabled: column(row, "attachment_enabled")?,
                created_at: column(row, "attachment_created_at")?,
                updated_at: column(row, "attachment_updated_at")?,
            }),
            None => None,
        };

        let created_by = match optional_uuid_column(row, "creator_id")? {
            Some(id) => Some(UserSummary {
                id,
                username: column(row, "creator_username")?,
                full_name: column::<Option<String>>(row, "creator_full_name")?.unwrap_or_default(),
            }),
            None => None,
        };

        Ok(Order {
            id: uuid_column(row, "id")?,
            order_number: column(row, "order_number")?,
            origin: column(row, "origin")?,
            destination: column(row, "destination")?,
            distance_km: column(row, "distance_km")?,
            estimated_duration_minutes: column(row, "estimated_duration_minutes")?,
            status,
            driver,
            attachment,
            created_by,
            enabled: column(row, "enabled")?,
            deleted: column(row, "deleted")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
            modified_by: column(row, "modified_by")?,
        })
    }

    async fn find_one(&self, condition: &str, value: String) -> Result<Option<Order>, DomainError> {
        let query = format!("{} WHERE {} AND o.deleted = FALSE LIMIT 1", SELECT_ORDER, condition);
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to find order", e))?;
        row.as_ref().map(Self::row_to_order).transpose()
    }

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE id = ? AND deleted = FALSE")
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("Failed to check order", e))?;
        Ok(count > 0)
    }
}

/// Append the `WHERE` clause for `filter`; unset criteria are skipped
fn push_filters(builder: &mut QueryBuilder<'_, MySql>, filter: &OrderFilter) {
    builder.push(" WHERE o.deleted = FALSE");

    if let Some(label) = &filter.status_label {
        builder.push(" AND s.status_label = ").push_bind(label.clone());
    }
    if let Some(start) = filter.start_date {
        builder.push(" AND o.created_at >= ").push_bind(start);
    }
    if let Some(end) = filter.end_date {
        builder.push(" AND o.created_at <= ").push_bind(end);
    }
    if let Some(location) = &filter.location {
        let pattern = like_pattern(location);
        builder
            .push(" AND (LOWER(o.origin) LIKE ")
            .push_bind(pattern.clone())
            .push(" OR LOWER(o.destination) LIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[async_trait]
impl OrderRepository for MySqlOrderRepository {
    async fn create(&self, order: Order) -> Result<Order, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, order_number, origin, destination, distance_km, estimated_duration_minutes,
                order_status_id, driver_id, attachment_id, created_by_user_id,
                enabled, deleted, created_at, updated_at, modified_by
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(order.id.to_string())
        .bind(&order.order_number)
        .bind(&order.origin)
        .bind(&order.destination)
        .bind(order.distance_km)
        .bind(order.estimated_duration_minutes)
        .bind(order.status.id.to_string())
        .bind(order.driver.as_ref().map(|d| d.id.to_string()))
        .bind(order.attachment.as_ref().map(|a| a.id.to_string()))
        .bind(order.created_by.as_ref().map(|u| u.id.to_string()))
        .bind(order.enabled)
        .bind(order.deleted)
        .bind(order.created_at)
        .bind(order.updated_at)
        .bind(&order.modified_by)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to create order", e))?;

        tracing::debug!(order_number = %order.order_number, "Inserted order");
        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        self.find_one("o.id = ?", id.to_string()).await
    }

    async fn find_by_order_number(&self, order_number: &str) -> Result<Option<Order>, DomainError> {
        self.find_one("o.order_number = ?", order_number.to_string()).await
    }

    async fn find_with_filters(
        &self,
        filter: &OrderFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Order>, u64), DomainError> {
        let mut count_query = QueryBuilder::<MySql>::new(
            "SELECT COUNT(*) FROM orders o JOIN order_statuses s ON s.id = o.order_status_id",
        );
        push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("Failed to count orders", e))?;

        let mut page_query = QueryBuilder::<MySql>::new(SELECT_ORDER);
        push_filters(&mut page_query, filter);
        page_query
            .push(" ORDER BY o.created_at DESC LIMIT ")
            .push_bind(pagination.limit() as i64)
            .push(" OFFSET ")
            .push_bind(pagination.offset() as i64);

        let rows = page_query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("Failed to list orders", e))?;

        let orders = rows.iter().map(Self::row_to_order).collect::<Result<Vec<_>, _>>()?;
        Ok((orders, total.max(0) as u64))
    }

    async fn find_by_driver(&self, driver_id: Uuid) -> Result<Vec<Order>, DomainError> {
        let query = format!(
            "{} WHERE o.driver_id = ? AND o.deleted = FALSE ORDER BY o.created_at DESC",
            SELECT_ORDER
        );
        let rows = sqlx::query(&query)
            .bind(driver_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("Failed to list driver orders", e))?;
        rows.iter().map(Self::row_to_order).collect()
    }

    async fn save_if_status(&self, order: Order, expected_status: &str) -> Result<Order, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE orders o
            JOIN order_statuses s ON s.id = o.order_status_id
            SET o.origin = ?, o.destination = ?, o.distance_km = ?,
                o.estimated_duration_minutes = ?, o.order_status_id = ?,
                o.driver_id = ?, o.attachment_id = ?, o.enabled = ?, o.deleted = ?,
                o.updated_at = ?, o.modified_by = ?
            WHERE o.id = ? AND o.deleted = FALSE AND s.status_label = ?
            "#,
        )
        .bind(&order.origin)
        .bind(&order.destination)
        .bind(order.distance_km)
        .bind(order.estimated_duration_minutes)
        .bind(order.status.id.to_string())
        .bind(order.driver.as_ref().map(|d| d.id.to_string()))
        .bind(order.attachment.as_ref().map(|a| a.id.to_string()))
        .bind(order.enabled)
        .bind(order.deleted)
        .bind(order.updated_at)
        .bind(&order.modified_by)
        .bind(order.id.to_string())
        .bind(expected_status)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to update order", e))?;

        if result.rows_affected() == 0 {
            if !self.exists(order.id).await? {
                return Err(DomainError::not_found(format!("Order not found with ID: {}", order.id)));
            }
            tracing::warn!(
                order_number = %order.order_number,
                expected = expected_status,
                "Order status changed concurrently"
            );
            return Err(DomainError::Conflict {
                message: format!(
                    "Order {} was modified concurrently; expected status {}",
                    order.order_number, expected_status
                ),
            });
        }

        Ok(order)
    }
}
