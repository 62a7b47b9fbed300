//! Unit tests for database connection pool

use om_shared::DatabaseConfig;

use super::test_database_config;
use crate::database::connection::{DatabasePool, PoolStatistics};
use crate::InfrastructureError;

#[tokio::test]
async fn test_pool_creation_with_invalid_url() {
    let config = DatabaseConfig::new("not a database url");

    let result = DatabasePool::new(&config).await;
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_pool_health_check() {
    let pool = DatabasePool::new(&test_database_config()).await.unwrap();
    let health = pool.health_check().await.unwrap();
    assert!(health);
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_migrations_are_idempotent() {
    let pool = DatabasePool::new(&test_database_config()).await.unwrap();
    pool.run_migrations().await.unwrap();
    pool.run_migrations().await.unwrap();
    assert!(pool.get_statistics().connections >= 1);
}

#[test]
fn test_pool_statistics_display() {
    let stats = PoolStatistics {
        connections: 5,
        idle_connections: 3,
        max_connections: 10,
    };

    let display = format!("{}", stats);
    assert!(display.contains("5/10"));
    assert!(display.contains("3 idle"));
}
