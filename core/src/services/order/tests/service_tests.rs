//! Unit tests for the order service

use uuid::Uuid;

use om_shared::Pagination;

use crate::domain::entities::OrderStatusLabel;
use crate::errors::{DomainError, OrderError};
use crate::repositories::{OrderFilter, OrderRepository};
use crate::services::order::generate_order_number;

use super::fixtures::{add_driver, fixture, new_order};

#[tokio::test]
async fn test_create_order_starts_in_created() {
    let f = fixture();
    let order = f
        .service
        .create_order("alice", new_order("Colombo", "Kandy"))
        .await
        .unwrap();

    assert_eq!(order.status_label(), "CREATED");
    assert!(order.enabled && !order.deleted);
    assert!(order.driver.is_none());
    assert_eq!(order.distance_km, Some(115.5));

    let creator = order.created_by.as_ref().unwrap();
    assert_eq!(creator.id, f.creator.id);
    assert_eq!(creator.full_name, "Alice Silva");
    assert!(order.order_number.starts_with("ORD-"));
}

#[tokio::test]
async fn test_create_order_unknown_creator() {
    let f = fixture();
    let err = f
        .service
        .create_order("mallory", new_order("Colombo", "Kandy"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Current user not found: mallory");
    assert_eq!(f.orders.count().await, 0);
}

#[tokio::test]
async fn test_create_order_requires_locations() {
    let f = fixture();
    let err = f
        .service
        .create_order("alice", new_order(" ", "Kandy"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn test_get_order_lookups() {
    let f = fixture();
    let order = f.service.create_order("alice", new_order("Colombo", "Kandy")).await.unwrap();

    assert_eq!(f.service.get_order_by_id(order.id).await.unwrap().id, order.id);
    assert_eq!(
        f.service.get_order_by_number(&order.order_number).await.unwrap().id,
        order.id
    );

    let missing = Uuid::new_v4();
    let err = f.service.get_order_by_id(missing).await.unwrap_err();
    assert_eq!(err.to_string(), format!("Order not found with ID: {}", missing));

    let err = f.service.get_order_by_number("ORD-0-X").await.unwrap_err();
    assert_eq!(err.to_string(), "Order not found with number: ORD-0-X");
}

#[tokio::test]
async fn test_update_status_forward_and_cancel() {
    let f = fixture();
    let order = f.service.create_order("alice", new_order("Colombo", "Kandy")).await.unwrap();

    let in_transit = f
        .service
        .update_order_status(order.id, "IN_TRANSIT", Some("moderator"))
        .await
        .unwrap();
    assert_eq!(in_transit.status_label(), "IN_TRANSIT");
    assert_eq!(in_transit.modified_by.as_deref(), Some("moderator"));

    let cancelled = f
        .service
        .update_order_status(order.id, "CANCELLED", None)
        .await
        .unwrap();
    assert_eq!(cancelled.status_label(), "CANCELLED");

    let again = f
        .service
        .update_order_status(order.id, "CANCELLED", None)
        .await
        .unwrap();
    assert_eq!(again.status_label(), "CANCELLED");
}

#[tokio::test]
async fn test_update_status_backward_is_rejected_and_unchanged() {
    let f = fixture();
    let order = f.service.create_order("alice", new_order("Colombo", "Kandy")).await.unwrap();
    f.service.update_order_status(order.id, "DELIVERED", None).await.unwrap();

    let err = f
        .service
        .update_order_status(order.id, "CREATED", None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Order(OrderError::InvalidStatusTransition { .. })
    ));
    assert!(err.to_string().contains("DELIVERED") && err.to_string().contains("CREATED"));

    let stored = f.service.get_order_by_id(order.id).await.unwrap();
    assert_eq!(stored.status_label(), "DELIVERED");
}

#[tokio::test]
async fn test_update_status_unknown_label() {
    let f = fixture();
    let order = f.service.create_order("alice", new_order("Colombo", "Kandy")).await.unwrap();

    let err = f
        .service
        .update_order_status(order.id, "SHIPPED", None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid status: CREATED -> SHIPPED");
}

#[tokio::test]
async fn test_stale_status_commit_conflicts() {
    let f = fixture();
    let order = f.service.create_order("alice", new_order("Colombo", "Kandy")).await.unwrap();

    // A concurrent writer moves the order after our read
    let stale = f.service.get_order_by_id(order.id).await.unwrap();
    f.service.update_order_status(order.id, "DELIVERED", None).await.unwrap();

    let mut rewound = stale.clone();
    rewound.status = crate::domain::entities::OrderStatus::new(OrderStatusLabel::Assigned);
    let result = f.orders.save_if_status(rewound, stale.status_label()).await;

    assert!(matches!(result, Err(DomainError::Conflict { .. })));
}

#[tokio::test]
async fn test_assign_enabled_driver() {
    let f = fixture();
    let order = f.service.create_order("alice", new_order("Colombo", "Kandy")).await.unwrap();
    let driver = add_driver(&f.drivers, "Nimal", true).await;

    let assigned = f
        .service
        .assign_driver(order.id, driver.id, Some("admin"))
        .await
        .unwrap();

    assert_eq!(assigned.status_label(), "ASSIGNED");
    assert_eq!(assigned.driver.as_ref().unwrap().id, driver.id);

    let by_driver = f.service.orders_by_driver(driver.id).await.unwrap();
    assert_eq!(by_driver.len(), 1);
    assert_eq!(by_driver[0].id, order.id);
}

#[tokio::test]
async fn test_assign_inactive_driver_leaves_order_unchanged() {
    let f = fixture();
    let order = f.service.create_order("alice", new_order("Colombo", "Kandy")).await.unwrap();
    let driver = add_driver(&f.drivers, "Kamal", false).await;

    let err = f
        .service
        .assign_driver(order.id, driver.id, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Order(OrderError::InactiveDriverAssignment { .. })
    ));

    let stored = f.service.get_order_by_id(order.id).await.unwrap();
    assert_eq!(stored.status_label(), "CREATED");
    assert!(stored.driver.is_none());
}

#[tokio::test]
async fn test_reassignment_is_rejected() {
    let f = fixture();
    let order = f.service.create_order("alice", new_order("Colombo", "Kandy")).await.unwrap();
    let first = add_driver(&f.drivers, "Nimal", true).await;
    let second = add_driver(&f.drivers, "Sunil", true).await;
    f.service.assign_driver(order.id, first.id, None).await.unwrap();

    let err = f
        .service
        .assign_driver(order.id, second.id, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Order(OrderError::AssignmentNotAllowed { .. })
    ));
    assert!(err.to_string().contains("CREATED"));
}

#[tokio::test]
async fn test_assign_unknown_driver() {
    let f = fixture();
    let order = f.service.create_order("alice", new_order("Colombo", "Kandy")).await.unwrap();
    let missing = Uuid::new_v4();

    let err = f.service.assign_driver(order.id, missing, None).await.unwrap_err();
    assert_eq!(err.to_string(), format!("Driver not found with ID: {}", missing));
}

#[tokio::test]
async fn test_list_orders_filters_by_status_and_location() {
    let f = fixture();
    let colombo = f.service.create_order("alice", new_order("Colombo", "Kandy")).await.unwrap();
    f.service.create_order("alice", new_order("Galle", "Matara")).await.unwrap();
    f.service.update_order_status(colombo.id, "IN_TRANSIT", None).await.unwrap();

    let filter = OrderFilter {
        status_label: Some("IN_TRANSIT".to_string()),
        ..Default::default()
    };
    let page = f.service.list_orders(&filter, Pagination::default()).await.unwrap();
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].id, colombo.id);

    let filter = OrderFilter {
        location: Some("matara".to_string()),
        ..Default::default()
    };
    let page = f.service.list_orders(&filter, Pagination::default()).await.unwrap();
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].destination, "Matara");
}

#[tokio::test]
async fn test_list_orders_unknown_status_filter() {
    let f = fixture();
    let filter = OrderFilter {
        status_label: Some("LOST".to_string()),
        ..Default::default()
    };
    let err = f.service.list_orders(&filter, Pagination::default()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_orders_by_unknown_driver() {
    let f = fixture();
    let err = f.service.orders_by_driver(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[test]
fn test_order_number_format() {
    let number = generate_order_number();
    let parts: Vec<&str> = number.split('-').collect();

    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "ORD");
    assert_eq!(parts[1].len(), 5);
    assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(parts[2].len(), 8);
    assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
}
