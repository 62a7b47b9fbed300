//! # Infrastructure Layer
//!
//! Concrete implementations behind the `om_core` repository traits:
//!
//! - **Database**: MySQL repositories using SQLx, pool management and migrations
//! - **Storage**: Local-disk attachment store
//! - **Bootstrap**: Startup wiring, upload directory creation and seeding
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use om_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Storage module - attachment file persistence
pub mod storage;

/// Bootstrap module - startup wiring and reference data seeding
#[cfg(feature = "mysql")]
pub mod bootstrap;

#[cfg(feature = "mysql")]
pub use bootstrap::{initialize, Infrastructure};
pub use storage::LocalFileStore;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error raised by a domain service during startup
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Domain(inner) => inner,
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
