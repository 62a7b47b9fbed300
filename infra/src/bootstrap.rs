//! Startup wiring
//!
//! Connects to MySQL, applies migrations, prepares the upload directory and
//! seeds the reference data every deployment needs (order statuses and
//! attachment types).

use std::sync::Arc;

use om_core::repositories::{
    AttachmentRepository, DriverRepository, OrderRepository, OrderStatusRepository, UserRepository,
};
use om_core::services::{AttachmentService, FileStore, OrderStatusService};
use om_shared::AppConfig;

use crate::database::{
    DatabasePool, MySqlAttachmentRepository, MySqlDriverRepository, MySqlOrderRepository,
    MySqlOrderStatusRepository, MySqlUserRepository,
};
use crate::storage::LocalFileStore;
use crate::InfrastructureError;

/// Concrete repositories and stores behind the core traits
#[derive(Clone)]
pub struct Infrastructure {
    pub pool: DatabasePool,
    pub users: Arc<dyn UserRepository>,
    pub order_statuses: Arc<dyn OrderStatusRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub drivers: Arc<dyn DriverRepository>,
    pub attachments: Arc<dyn AttachmentRepository>,
    pub file_store: Arc<dyn FileStore>,
}

impl Infrastructure {
    /// Build every MySQL repository on a shared pool
    pub fn new(pool: DatabasePool, file_store: LocalFileStore) -> Self {
        let mysql = pool.get_pool().clone();
        Self {
            users: Arc::new(MySqlUserRepository::new(mysql.clone())),
            order_statuses: Arc::new(MySqlOrderStatusRepository::new(mysql.clone())),
            orders: Arc::new(MySqlOrderRepository::new(mysql.clone())),
            drivers: Arc::new(MySqlDriverRepository::new(mysql.clone())),
            attachments: Arc::new(MySqlAttachmentRepository::new(mysql)),
            file_store: Arc::new(file_store),
            pool,
        }
    }

    /// Seed default order statuses and attachment types; existing rows are kept
    pub async fn seed_reference_data(&self, max_file_size: usize) -> Result<(), InfrastructureError> {
        let statuses = OrderStatusService::new(self.order_statuses.clone())
            .initialize_default_statuses()
            .await?;
        let types = AttachmentService::new(self.attachments.clone(), self.file_store.clone(), max_file_size)
            .initialize_default_attachment_types()
            .await?;

        tracing::info!(
            created_statuses = statuses,
            created_attachment_types = types,
            "Reference data initialized"
        );
        Ok(())
    }
}

/// Connect, migrate, prepare storage and seed reference data
///
/// A missing upload directory that cannot be created is logged and startup
/// continues; uploads will fail until it exists.
pub async fn initialize(config: &AppConfig) -> Result<Infrastructure, InfrastructureError> {
    let pool = DatabasePool::new(&config.database).await?;
    pool.run_migrations().await?;

    let file_store = LocalFileStore::new(config.upload.directory.clone());
    if let Err(e) = file_store.ensure_directory().await {
        tracing::warn!(
            directory = %config.upload.directory.display(),
            error = %e,
            "Could not create upload directory"
        );
    }

    let infrastructure = Infrastructure::new(pool, file_store);
    infrastructure.seed_reference_data(config.upload.max_file_size).await?;

    tracing::info!("{}", infrastructure.pool.get_statistics());
    Ok(infrastructure)
}
