//! In-memory implementation of OrderRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use om_shared::Pagination;

use crate::domain::entities::Order;
use crate::errors::DomainError;

use super::trait_::{OrderFilter, OrderRepository};

/// In-memory order repository
///
/// The write lock makes `save_if_status` a true compare-and-swap.
#[derive(Clone, Default)]
pub struct MockOrderRepository {
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
}

impl MockOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders, deleted ones included
    pub async fn count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderRepository for MockOrderRepository {
    async fn create(&self, order: Order) -> Result<Order, DomainError> {
        let mut orders = self.orders.write().await;
        if orders.values().any(|o| o.order_number == order.order_number) {
            return Err(DomainError::Conflict {
                message: format!("Order number already exists: {}", order.order_number),
            });
        }
        orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id).filter(|o| !o.deleted).cloned())
    }

    async fn find_by_order_number(&self, order_number: &str) -> Result<Option<Order>, DomainError> {
        let orders = self.orders.read().await;
        Ok(orders
            .values()
            .find(|o| !o.deleted && o.order_number == order_number)
            .cloned())
    }

    async fn find_with_filters(
        &self,
        filter: &OrderFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Order>, u64), DomainError> {
        let orders = self.orders.read().await;
        let mut matching: Vec<&Order> = orders
            .values()
            .filter(|o| !o.deleted && filter.matches(o))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn find_by_driver(&self, driver_id: Uuid) -> Result<Vec<Order>, DomainError> {
        let orders = self.orders.read().await;
        Ok(orders
            .values()
            .filter(|o| !o.deleted && o.driver.as_ref().is_some_and(|d| d.id == driver_id))
            .cloned()
            .collect())
    }

    async fn save_if_status(&self, order: Order, expected_status: &str) -> Result<Order, DomainError> {
        let mut orders = self.orders.write().await;
        let stored = orders
            .get_mut(&order.id)
            .filter(|o| !o.deleted)
            .ok_or_else(|| DomainError::not_found(format!("Order not found with ID: {}", order.id)))?;

        if stored.status_label() != expected_status {
            return Err(DomainError::Conflict {
                message: format!(
                    "Order {} was modified concurrently: expected status {}, found {}",
                    order.id,
                    expected_status,
                    stored.status_label()
                ),
            });
        }

        *stored = order.clone();
        Ok(order)
    }
}
