//! MySQL repository tests against a live, migrated database

use om_core::domain::entities::{Driver, Order, OrderStatus, OrderStatusLabel, Role, User};
use om_core::errors::DomainError;
use om_core::repositories::{
    DriverRepository, OrderFilter, OrderRepository, OrderStatusRepository, UserRepository,
};
use om_shared::Pagination;
use uuid::Uuid;

use super::migrated_pool;
use crate::database::{
    MySqlDriverRepository, MySqlOrderRepository, MySqlOrderStatusRepository, MySqlUserRepository,
};

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}

async fn status(repo: &MySqlOrderStatusRepository, label: OrderStatusLabel) -> OrderStatus {
    if let Some(existing) = repo.find_by_label(label.as_str()).await.unwrap() {
        return existing;
    }
    repo.save(OrderStatus::new(label)).await.unwrap()
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_user_roundtrip_with_roles() {
    let pool = migrated_pool().await;
    let repo = MySqlUserRepository::new(pool.get_pool().clone());

    let username = unique("user");
    let user = User::new(&username, "Ada", "Lovelace", format!("{}@example.com", username))
        .with_role(Role::new("ROLE_USER").with_permission("ORDER_READ"));
    repo.save(user).await.unwrap();

    let found = repo.find_by_username(&username).await.unwrap().unwrap();
    assert_eq!(found.full_name(), "Ada Lovelace");
    assert!(found.authorities().contains(&"ROLE_USER".to_string()));
    assert!(found.authorities().contains(&"ORDER_READ".to_string()));
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_duplicate_driver_is_conflict() {
    let pool = migrated_pool().await;
    let repo = MySqlDriverRepository::new(pool.get_pool().clone());

    let name = unique("driver");
    let driver = Driver::new(name.clone(), unique("LIC"), unique("555"), format!("{}@example.com", name));
    repo.create(driver.clone()).await.unwrap();

    let mut duplicate = driver.clone();
    duplicate.id = Uuid::new_v4();
    let result = repo.create(duplicate).await;
    assert!(matches!(result, Err(DomainError::Conflict { .. })));
    assert!(repo.exists_by_name(&name).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_order_status_compare_and_swap() {
    let pool = migrated_pool().await;
    let statuses = MySqlOrderStatusRepository::new(pool.get_pool().clone());
    let orders = MySqlOrderRepository::new(pool.get_pool().clone());

    let created = status(&statuses, OrderStatusLabel::Created).await;
    let cancelled = status(&statuses, OrderStatusLabel::Cancelled).await;

    let order = Order::new(unique("ORD"), "Warehouse A".into(), "Depot B".into(), created, None);
    let order = orders.create(order).await.unwrap();

    let mut first = order.clone();
    first.status = cancelled.clone();
    orders.save_if_status(first, "CREATED").await.unwrap();

    let mut second = order.clone();
    second.status = cancelled;
    let result = orders.save_if_status(second, "CREATED").await;
    assert!(matches!(result, Err(DomainError::Conflict { .. })));

    let stored = orders.find_by_id(order.id).await.unwrap().unwrap();
    assert_eq!(stored.status_label(), "CANCELLED");
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_filter_by_location() {
    let pool = migrated_pool().await;
    let statuses = MySqlOrderStatusRepository::new(pool.get_pool().clone());
    let orders = MySqlOrderRepository::new(pool.get_pool().clone());

    let created = status(&statuses, OrderStatusLabel::Created).await;
    let town = unique("Town");
    let order = Order::new(unique("ORD"), format!("{} North", town), "Harbor".into(), created, None);
    orders.create(order).await.unwrap();

    let filter = OrderFilter {
        location: Some(town.to_uppercase()),
        ..Default::default()
    };
    let (page, total) = orders.find_with_filters(&filter, Pagination::default()).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(page.len(), 1);
}
