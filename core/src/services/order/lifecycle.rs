//! Order status state machine and driver-assignment precondition.

use crate::domain::entities::{Driver, Order, OrderStatus, OrderStatusLabel};
use crate::errors::OrderError;

/// Rules governing how an order moves through its statuses
///
/// Labels are totally ordered by [`OrderLifecycle::STATUS_FLOW`]. A
/// transition is allowed when it stays put, moves forward, or cancels.
/// The rules are pure; committing the result is the repository's job.
pub struct OrderLifecycle;

impl OrderLifecycle {
    /// Precedence list, index 0..=4
    pub const STATUS_FLOW: [OrderStatusLabel; 5] = OrderStatusLabel::ALL;

    /// The only status a driver can be assigned from
    pub const ASSIGNABLE_FROM: OrderStatusLabel = OrderStatusLabel::Created;

    /// Whether `current -> target` is permitted
    pub fn can_transition(current: OrderStatusLabel, target: OrderStatusLabel) -> bool {
        current == target
            || target.precedence() > current.precedence()
            || target == OrderStatusLabel::Cancelled
    }

    /// Validates a transition between two stored labels
    ///
    /// # Errors
    ///
    /// * `OrderError::UnrecognizedStatus` - Either label is outside the vocabulary
    /// * `OrderError::InvalidStatusTransition` - Backward or sideways move
    pub fn validate_transition(current: &str, target: &str) -> Result<OrderStatusLabel, OrderError> {
        let (from, to) = match (current.parse::<OrderStatusLabel>(), target.parse::<OrderStatusLabel>()) {
            (Ok(from), Ok(to)) => (from, to),
            _ => {
                return Err(OrderError::UnrecognizedStatus {
                    from: current.to_string(),
                    to: target.to_string(),
                })
            }
        };

        if Self::can_transition(from, to) {
            Ok(to)
        } else {
            Err(OrderError::InvalidStatusTransition {
                from: current.to_string(),
                to: target.to_string(),
            })
        }
    }

    /// Returns `order` moved to `target`, leaving the input untouched
    pub fn transition(order: &Order, target: OrderStatus) -> Result<Order, OrderError> {
        Self::validate_transition(order.status_label(), &target.status_label)?;

        let mut updated = order.clone();
        updated.status = target;
        Ok(updated)
    }

    /// Fails unless the order is still in `CREATED`
    pub fn ensure_assignable(order: &Order) -> Result<(), OrderError> {
        if order.status_label() == Self::ASSIGNABLE_FROM.as_str() {
            Ok(())
        } else {
            Err(OrderError::AssignmentNotAllowed {
                required: Self::ASSIGNABLE_FROM.to_string(),
                current: order.status_label().to_string(),
            })
        }
    }

    /// Returns `order` with `driver` set and status `ASSIGNED`
    ///
    /// Both fields change on the returned value or neither does; the input
    /// order is never modified.
    ///
    /// # Errors
    ///
    /// * `OrderError::AssignmentNotAllowed` - The order is not `CREATED`
    /// * `OrderError::InactiveDriverAssignment` - The driver is disabled
    pub fn assign_driver(
        order: &Order,
        driver: &Driver,
        assigned_status: OrderStatus,
    ) -> Result<Order, OrderError> {
        Self::ensure_assignable(order)?;

        if !driver.enabled {
            return Err(OrderError::InactiveDriverAssignment {
                driver_id: driver.id.to_string(),
            });
        }

        if assigned_status.label() != Some(OrderStatusLabel::Assigned) {
            return Err(OrderError::InvalidStatusTransition {
                from: order.status_label().to_string(),
                to: assigned_status.status_label,
            });
        }

        let mut updated = order.clone();
        updated.driver = Some(driver.clone());
        updated.status = assigned_status;
        Ok(updated)
    }
}
