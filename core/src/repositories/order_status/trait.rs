use async_trait::async_trait;

use crate::domain::entities::OrderStatus;
use crate::errors::DomainError;

/// Lookup of the order status reference rows
#[async_trait]
pub trait OrderStatusRepository: Send + Sync {
    /// Find an enabled status by its exact label
    async fn find_by_label(&self, label: &str) -> Result<Option<OrderStatus>, DomainError>;

    /// All enabled statuses, in precedence order where the label is known
    async fn find_all_active(&self) -> Result<Vec<OrderStatus>, DomainError>;

    async fn exists_by_label(&self, label: &str) -> Result<bool, DomainError>;

    async fn save(&self, status: OrderStatus) -> Result<OrderStatus, DomainError>;
}
