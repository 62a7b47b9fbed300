//! Order status reference data

use std::sync::Arc;

use crate::domain::entities::{OrderStatus, OrderStatusLabel};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::OrderStatusRepository;

/// Lookups over the order status vocabulary
pub struct OrderStatusService {
    repository: Arc<dyn OrderStatusRepository>,
}

impl OrderStatusService {
    pub fn new(repository: Arc<dyn OrderStatusRepository>) -> Self {
        Self { repository }
    }

    /// Enabled statuses in precedence order
    pub async fn list_active_statuses(&self) -> DomainResult<Vec<OrderStatus>> {
        tracing::debug!("Fetching all active order statuses");
        self.repository.find_all_active().await
    }

    /// Resolve the stored status row for `label`
    pub async fn get_status_by_label(&self, label: &str) -> DomainResult<OrderStatus> {
        self.repository
            .find_by_label(label)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Order status not found: {}", label)))
    }

    /// Resolve a status known to be in the vocabulary
    pub async fn get_status(&self, label: OrderStatusLabel) -> DomainResult<OrderStatus> {
        self.get_status_by_label(label.as_str()).await
    }

    /// Seed every missing label; returns how many were created
    ///
    /// Safe to call on every startup.
    pub async fn initialize_default_statuses(&self) -> DomainResult<usize> {
        let mut created = 0;
        for label in OrderStatusLabel::ALL {
            if !self.repository.exists_by_label(label.as_str()).await? {
                self.repository.save(OrderStatus::new(label)).await?;
                tracing::info!(status = %label, "Created default order status");
                created += 1;
            }
        }
        Ok(created)
    }
}
