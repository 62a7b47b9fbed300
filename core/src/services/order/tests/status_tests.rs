//! Unit tests for the order status service

use std::sync::Arc;

use crate::errors::DomainError;
use crate::repositories::MockOrderStatusRepository;
use crate::services::order::OrderStatusService;

#[tokio::test]
async fn test_initialize_default_statuses_is_idempotent() {
    let service = OrderStatusService::new(Arc::new(MockOrderStatusRepository::new()));

    assert_eq!(service.initialize_default_statuses().await.unwrap(), 5);
    assert_eq!(service.initialize_default_statuses().await.unwrap(), 0);

    let labels: Vec<String> = service
        .list_active_statuses()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.status_label)
        .collect();
    assert_eq!(labels, vec!["CREATED", "ASSIGNED", "IN_TRANSIT", "DELIVERED", "CANCELLED"]);
}

#[tokio::test]
async fn test_unknown_label_is_not_found() {
    let service = OrderStatusService::new(Arc::new(MockOrderStatusRepository::seeded()));

    let err = service.get_status_by_label("SHIPPED").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    assert_eq!(err.to_string(), "Order status not found: SHIPPED");
}

#[tokio::test]
async fn test_get_status_by_label() {
    let service = OrderStatusService::new(Arc::new(MockOrderStatusRepository::seeded()));
    let status = service.get_status_by_label("DELIVERED").await.unwrap();
    assert_eq!(status.status_label, "DELIVERED");
}
