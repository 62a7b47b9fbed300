//! Unit tests for the order status state machine

use crate::domain::entities::{Driver, Order, OrderStatus, OrderStatusLabel};
use crate::errors::OrderError;
use crate::services::order::OrderLifecycle;

use OrderStatusLabel::*;

fn order_in(label: OrderStatusLabel) -> Order {
    Order::new(
        "ORD-00001-0000ABCD".to_string(),
        "Colombo".to_string(),
        "Kandy".to_string(),
        OrderStatus::new(label),
        None,
    )
}

fn driver(enabled: bool) -> Driver {
    let mut driver = Driver::new(
        "Nimal".to_string(),
        "B1234567".to_string(),
        "+94771234567".to_string(),
        "nimal@example.com".to_string(),
    );
    driver.enabled = enabled;
    driver
}

#[test]
fn test_transition_table_over_full_vocabulary() {
    for current in OrderLifecycle::STATUS_FLOW {
        for target in OrderLifecycle::STATUS_FLOW {
            let expected = target == current
                || target.precedence() > current.precedence()
                || target == Cancelled;

            assert_eq!(
                OrderLifecycle::can_transition(current, target),
                expected,
                "{} -> {}",
                current,
                target
            );
            assert_eq!(
                OrderLifecycle::validate_transition(current.as_str(), target.as_str()).is_ok(),
                expected,
                "{} -> {}",
                current,
                target
            );
        }
    }
}

#[test]
fn test_delivered_to_created_is_rejected_naming_both() {
    let err = OrderLifecycle::validate_transition("DELIVERED", "CREATED").unwrap_err();

    assert_eq!(
        err,
        OrderError::InvalidStatusTransition {
            from: "DELIVERED".to_string(),
            to: "CREATED".to_string(),
        }
    );
    let message = err.to_string();
    assert!(message.contains("DELIVERED") && message.contains("CREATED"));
}

#[test]
fn test_in_transit_to_cancelled_is_allowed() {
    assert_eq!(
        OrderLifecycle::validate_transition("IN_TRANSIT", "CANCELLED"),
        Ok(Cancelled)
    );
}

#[test]
fn test_cancelled_to_cancelled_is_a_no_op() {
    assert!(OrderLifecycle::can_transition(Cancelled, Cancelled));
}

#[test]
fn test_nothing_leaves_cancelled_except_cancelled() {
    for target in [Created, Assigned, InTransit, Delivered] {
        assert!(!OrderLifecycle::can_transition(Cancelled, target));
    }
}

#[test]
fn test_forward_skips_are_allowed() {
    assert!(OrderLifecycle::can_transition(Created, Delivered));
}

#[test]
fn test_unrecognized_labels_are_rejected() {
    for (current, target) in [("CREATED", "SHIPPED"), ("LOST", "CANCELLED"), ("created", "ASSIGNED")] {
        let err = OrderLifecycle::validate_transition(current, target).unwrap_err();
        assert_eq!(
            err,
            OrderError::UnrecognizedStatus {
                from: current.to_string(),
                to: target.to_string(),
            }
        );
        assert!(err.is_invalid_transition());
    }
}

#[test]
fn test_transition_returns_new_order_and_keeps_input() {
    let order = order_in(Assigned);
    let updated = OrderLifecycle::transition(&order, OrderStatus::new(InTransit)).unwrap();

    assert_eq!(updated.status_label(), "IN_TRANSIT");
    assert_eq!(order.status_label(), "ASSIGNED");
}

#[test]
fn test_assign_from_assigned_is_rejected_naming_created() {
    let order = order_in(Assigned);
    let err = OrderLifecycle::assign_driver(&order, &driver(true), OrderStatus::new(Assigned)).unwrap_err();

    assert_eq!(
        err,
        OrderError::AssignmentNotAllowed {
            required: "CREATED".to_string(),
            current: "ASSIGNED".to_string(),
        }
    );
    assert!(err.to_string().contains("CREATED"));
}

#[test]
fn test_assign_inactive_driver_is_rejected() {
    let order = order_in(Created);
    let inactive = driver(false);
    let err = OrderLifecycle::assign_driver(&order, &inactive, OrderStatus::new(Assigned)).unwrap_err();

    assert_eq!(
        err,
        OrderError::InactiveDriverAssignment {
            driver_id: inactive.id.to_string(),
        }
    );
    assert_eq!(order.status_label(), "CREATED");
    assert!(order.driver.is_none());
}

#[test]
fn test_assign_enabled_driver_sets_driver_and_status_together() {
    let order = order_in(Created);
    let active = driver(true);
    let updated = OrderLifecycle::assign_driver(&order, &active, OrderStatus::new(Assigned)).unwrap();

    assert_eq!(updated.status_label(), "ASSIGNED");
    assert_eq!(updated.driver.as_ref().map(|d| d.id), Some(active.id));
    assert_eq!(updated.id, order.id);
}

#[test]
fn test_assign_with_wrong_target_status_is_rejected() {
    let order = order_in(Created);
    let result = OrderLifecycle::assign_driver(&order, &driver(true), OrderStatus::new(InTransit));
    assert!(matches!(result, Err(OrderError::InvalidStatusTransition { .. })));
}
