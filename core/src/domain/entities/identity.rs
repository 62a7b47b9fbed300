//! The identity attached to a request after successful token authentication.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Well-known role authorities
pub mod authorities {
    pub const ROLE_USER: &str = "ROLE_USER";
    pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
    pub const ROLE_MODERATOR: &str = "ROLE_MODERATOR";
}

/// Username plus the ordered set of granted authorities
///
/// Lives for the duration of one request and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedIdentity {
    pub username: String,
    pub authorities: BTreeSet<String>,
}

impl AuthenticatedIdentity {
    pub fn new<I, S>(username: impl Into<String>, authorities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            username: username.into(),
            authorities: authorities.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }

    /// True when at least one of `required` is granted
    pub fn has_any_authority(&self, required: &[&str]) -> bool {
        required.iter().any(|authority| self.has_authority(authority))
    }
}
