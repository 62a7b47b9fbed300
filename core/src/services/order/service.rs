//! Order use cases: creation, lookup, listing, status changes, driver
//! assignment and attachments.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use om_shared::{PaginatedResponse, Pagination};

use crate::domain::entities::{Attachment, Driver, Order, OrderStatusLabel};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{DriverRepository, OrderFilter, OrderRepository, UserRepository};

use super::lifecycle::OrderLifecycle;
use super::status::OrderStatusService;
use super::types::NewOrder;

const ORDER_NUMBER_PREFIX: &str = "ORD";

/// Service coordinating orders with their statuses, drivers and creators
///
/// Every mutation reads the order, applies an [`OrderLifecycle`] rule to a
/// copy, and commits the copy with a compare-and-swap on the status label
/// that was read.
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    drivers: Arc<dyn DriverRepository>,
    users: Arc<dyn UserRepository>,
    statuses: Arc<OrderStatusService>,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        drivers: Arc<dyn DriverRepository>,
        users: Arc<dyn UserRepository>,
        statuses: Arc<OrderStatusService>,
    ) -> Self {
        Self {
            orders,
            drivers,
            users,
            statuses,
        }
    }

    /// Creates an order in `CREATED` on behalf of `username`
    ///
    /// # Errors
    ///
    /// * `DomainError::NotFound` - The creator or the `CREATED` status row is missing
    /// * `DomainError::Validation` - Origin or destination is blank
    pub async fn create_order(&self, username: &str, request: NewOrder) -> DomainResult<Order> {
        tracing::info!(
            origin = %request.origin,
            destination = %request.destination,
            "Creating new order"
        );

        if request.origin.trim().is_empty() || request.destination.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Origin and destination are required".to_string(),
            });
        }

        let creator = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Current user not found: {}", username)))?;

        let created = self.statuses.get_status(OrderStatusLabel::Created).await?;

        let mut order = Order::new(
            generate_order_number(),
            request.origin,
            request.destination,
            created,
            Some(creator.summary()),
        );
        order.distance_km = request.distance_km;
        order.estimated_duration_minutes = request.estimated_duration_minutes;

        let order = self.orders.create(order).await?;
        tracing::info!(order_number = %order.order_number, "Order created successfully");
        Ok(order)
    }

    pub async fn get_order_by_id(&self, id: Uuid) -> DomainResult<Order> {
        tracing::debug!(%id, "Fetching order by ID");
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Order not found with ID: {}", id)))
    }

    pub async fn get_order_by_number(&self, order_number: &str) -> DomainResult<Order> {
        tracing::debug!(%order_number, "Fetching order by number");
        self.orders
            .find_by_order_number(order_number)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("Order not found with number: {}", order_number))
            })
    }

    /// Pages through orders matching `filter`
    ///
    /// A status label in the filter must name an existing status.
    pub async fn list_orders(
        &self,
        filter: &OrderFilter,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<Order>> {
        tracing::debug!(?filter, "Listing orders with filters");

        if let Some(label) = filter.status_label.as_deref() {
            self.statuses.get_status_by_label(label).await?;
        }
        if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
            if start > end {
                return Err(DomainError::Validation {
                    message: "Start date must not be after end date".to_string(),
                });
            }
        }

        let pagination = pagination.validate();
        let (orders, total) = self.orders.find_with_filters(filter, pagination).await?;
        Ok(PaginatedResponse::new(orders, pagination, total))
    }

    /// Moves an order to `status_label`
    ///
    /// # Errors
    ///
    /// * `DomainError::NotFound` - Unknown order
    /// * `DomainError::Order` - The transition is not allowed
    /// * `DomainError::Conflict` - The order changed status concurrently
    pub async fn update_order_status(
        &self,
        id: Uuid,
        status_label: &str,
        modified_by: Option<&str>,
    ) -> DomainResult<Order> {
        tracing::info!(%id, status = %status_label, "Updating order status");

        let order = self.get_order_by_id(id).await?;
        let previous = order.status_label().to_string();

        let target = OrderLifecycle::validate_transition(&previous, status_label)?;
        let status = self.statuses.get_status(target).await?;

        let mut updated = OrderLifecycle::transition(&order, status)?;
        updated.touch(modified_by);

        let saved = self.orders.save_if_status(updated, &previous).await?;
        tracing::info!(%id, from = %previous, to = %status_label, "Order status updated successfully");
        Ok(saved)
    }

    /// Assigns a driver to a `CREATED` order and moves it to `ASSIGNED`
    ///
    /// # Errors
    ///
    /// * `DomainError::NotFound` - Unknown order or driver
    /// * `DomainError::Order` - Order not `CREATED`, or driver disabled
    /// * `DomainError::Conflict` - The order changed status concurrently
    pub async fn assign_driver(
        &self,
        order_id: Uuid,
        driver_id: Uuid,
        modified_by: Option<&str>,
    ) -> DomainResult<Order> {
        tracing::info!(%order_id, %driver_id, "Assigning driver to order");

        let order = self.get_order_by_id(order_id).await?;
        OrderLifecycle::ensure_assignable(&order)?;

        let driver = self.find_driver(driver_id).await?;
        let assigned = self.statuses.get_status(OrderStatusLabel::Assigned).await?;

        let previous = order.status_label().to_string();
        let mut updated = OrderLifecycle::assign_driver(&order, &driver, assigned)?;
        updated.touch(modified_by);

        let saved = self.orders.save_if_status(updated, &previous).await?;
        tracing::info!(%order_id, %driver_id, "Driver assigned successfully");
        Ok(saved)
    }

    /// Links a stored attachment to an order
    pub async fn add_attachment(
        &self,
        order_id: Uuid,
        attachment: Attachment,
        modified_by: Option<&str>,
    ) -> DomainResult<Order> {
        tracing::info!(%order_id, attachment_id = %attachment.id, "Adding attachment to order");

        let mut order = self.get_order_by_id(order_id).await?;
        let previous = order.status_label().to_string();
        order.attachment = Some(attachment);
        order.touch(modified_by);

        self.orders.save_if_status(order, &previous).await
    }

    /// Orders assigned to an existing driver
    pub async fn orders_by_driver(&self, driver_id: Uuid) -> DomainResult<Vec<Order>> {
        tracing::debug!(%driver_id, "Fetching orders for driver");
        let driver = self.find_driver(driver_id).await?;
        self.orders.find_by_driver(driver.id).await
    }

    async fn find_driver(&self, driver_id: Uuid) -> DomainResult<Driver> {
        self.drivers
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Driver not found with ID: {}", driver_id)))
    }
}

/// `ORD-<last 5 digits of epoch millis>-<8 uppercase hex>`
pub fn generate_order_number() -> String {
    let millis = Utc::now().timestamp_millis().to_string();
    let tail = &millis[millis.len().saturating_sub(5)..];
    let suffix = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
    format!("{}-{}-{}", ORDER_NUMBER_PREFIX, tail, suffix)
}
