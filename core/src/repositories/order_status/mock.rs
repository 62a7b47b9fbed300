//! In-memory implementation of OrderStatusRepository

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{OrderStatus, OrderStatusLabel};
use crate::errors::DomainError;

use super::trait_::OrderStatusRepository;

#[derive(Clone, Default)]
pub struct MockOrderStatusRepository {
    statuses: Arc<RwLock<Vec<OrderStatus>>>,
}

impl MockOrderStatusRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository seeded with the full status vocabulary
    pub fn seeded() -> Self {
        let statuses = OrderStatusLabel::ALL.into_iter().map(OrderStatus::new).collect();
        Self {
            statuses: Arc::new(RwLock::new(statuses)),
        }
    }
}

#[async_trait]
impl OrderStatusRepository for MockOrderStatusRepository {
    async fn find_by_label(&self, label: &str) -> Result<Option<OrderStatus>, DomainError> {
        let statuses = self.statuses.read().await;
        Ok(statuses
            .iter()
            .find(|s| s.enabled && s.status_label == label)
            .cloned())
    }

    async fn find_all_active(&self) -> Result<Vec<OrderStatus>, DomainError> {
        let statuses = self.statuses.read().await;
        let mut active: Vec<OrderStatus> = statuses.iter().filter(|s| s.enabled).cloned().collect();
        active.sort_by_key(|s| s.label().map_or(usize::MAX, |l| l.precedence()));
        Ok(active)
    }

    async fn exists_by_label(&self, label: &str) -> Result<bool, DomainError> {
        let statuses = self.statuses.read().await;
        Ok(statuses.iter().any(|s| s.status_label == label))
    }

    async fn save(&self, status: OrderStatus) -> Result<OrderStatus, DomainError> {
        let mut statuses = self.statuses.write().await;
        match statuses.iter_mut().find(|s| s.id == status.id) {
            Some(existing) => *existing = status.clone(),
            None => statuses.push(status.clone()),
        }
        Ok(status)
    }
}
