//! Order repository trait.
//!
//! Status changes go through [`OrderRepository::save_if_status`], a
//! compare-and-swap on the stored status label. Two concurrent transitions
//! read the same base status; only the first commit succeeds and the second
//! gets `DomainError::Conflict` instead of silently overwriting it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use om_shared::Pagination;

use crate::domain::entities::Order;
use crate::errors::DomainError;

/// Optional criteria for listing orders; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderFilter {
    /// Exact status label
    pub status_label: Option<String>,

    /// Inclusive lower bound on creation time
    pub start_date: Option<DateTime<Utc>>,

    /// Inclusive upper bound on creation time
    pub end_date: Option<DateTime<Utc>>,

    /// Case-insensitive substring of origin or destination
    pub location: Option<String>,
}

impl OrderFilter {
    /// Whether `order` satisfies every set criterion
    pub fn matches(&self, order: &Order) -> bool {
        self.status_label
            .as_deref()
            .map_or(true, |label| order.status_label() == label)
            && self.start_date.map_or(true, |start| order.created_at >= start)
            && self.end_date.map_or(true, |end| order.created_at <= end)
            && self
                .location
                .as_deref()
                .map_or(true, |location| order.matches_location(location))
    }
}

/// Repository trait for Order persistence
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - The order number is already taken
    async fn create(&self, order: Order) -> Result<Order, DomainError>;

    /// Find a non-deleted order by identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;

    /// Find a non-deleted order by its order number
    async fn find_by_order_number(&self, order_number: &str) -> Result<Option<Order>, DomainError>;

    /// Page through non-deleted orders matching `filter`, newest first
    ///
    /// # Returns
    /// The page content and the total number of matching orders
    async fn find_with_filters(
        &self,
        filter: &OrderFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Order>, u64), DomainError>;

    /// Non-deleted orders assigned to the driver
    async fn find_by_driver(&self, driver_id: Uuid) -> Result<Vec<Order>, DomainError>;

    /// Persist every mutable field of `order` only if the stored status
    /// label still equals `expected_status`
    ///
    /// # Returns
    /// * `Ok(Order)` - The committed order
    /// * `Err(DomainError::NotFound)` - The order no longer exists
    /// * `Err(DomainError::Conflict)` - The stored status changed since it was read
    async fn save_if_status(&self, order: Order, expected_status: &str) -> Result<Order, DomainError>;
}
