use std::sync::Arc;

use crate::domain::entities::User;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;

/// Read-only access to the caller's own account
pub struct UserProfileService {
    repository: Arc<dyn UserRepository>,
}

impl UserProfileService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// The user with roles and permissions for an authenticated username
    pub async fn get_profile(&self, username: &str) -> DomainResult<User> {
        tracing::debug!(%username, "Fetching user profile");
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User not found: {}", username)))
    }
}
