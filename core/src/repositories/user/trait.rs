//! User repository trait.
//!
//! Users are read-only from this service's point of view: they are looked up
//! to resolve order creators and to render the caller's profile. `save`
//! exists for seeding and tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::errors::DomainError;

/// Repository trait for User lookups
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by login name, with roles and permissions loaded
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that username
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Insert or replace a user
    async fn save(&self, user: User) -> Result<User, DomainError>;
}
