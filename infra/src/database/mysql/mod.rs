//! MySQL repository implementations
//!
//! Identifiers are stored as `CHAR(36)` UUID strings and timestamps as
//! `DATETIME(6)` in UTC.

mod attachment_repository_impl;
mod driver_repository_impl;
mod order_repository_impl;
mod order_status_repository_impl;
mod user_repository_impl;

pub use attachment_repository_impl::MySqlAttachmentRepository;
pub use driver_repository_impl::MySqlDriverRepository;
pub use order_repository_impl::MySqlOrderRepository;
pub use order_status_repository_impl::MySqlOrderStatusRepository;
pub use user_repository_impl::MySqlUserRepository;

use sqlx::mysql::MySqlRow;
use sqlx::{Decode, MySql, Row, Type};
use uuid::Uuid;

use om_core::errors::DomainError;

/// Read a typed column, mapping decode failures to `DomainError::Internal`
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: Decode<'r, MySql> + Type<MySql>,
{
    row.try_get(name)
        .map_err(|e| DomainError::internal(format!("Failed to get {}: {}", name, e)))
}

/// Read a `CHAR(36)` column as a UUID
pub(crate) fn uuid_column(row: &MySqlRow, name: &str) -> Result<Uuid, DomainError> {
    let raw: String = column(row, name)?;
    Uuid::parse_str(&raw).map_err(|e| DomainError::internal(format!("Invalid UUID in {}: {}", name, e)))
}

/// Read a nullable `CHAR(36)` column as a UUID
pub(crate) fn optional_uuid_column(row: &MySqlRow, name: &str) -> Result<Option<Uuid>, DomainError> {
    let raw: Option<String> = column(row, name)?;
    raw.map(|value| {
        Uuid::parse_str(&value)
            .map_err(|e| DomainError::internal(format!("Invalid UUID in {}: {}", name, e)))
    })
    .transpose()
}

/// Map a query failure, turning unique-key violations into `Conflict`
pub(crate) fn query_error(context: &str, err: sqlx::Error) -> DomainError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return DomainError::Conflict {
                message: format!("{}: duplicate value", context),
            };
        }
    }
    tracing::error!(error = %err, "{}", context);
    DomainError::internal(format!("{}: {}", context, err))
}
