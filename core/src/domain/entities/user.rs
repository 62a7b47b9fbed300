//! User entity with roles and permissions, as read for profile lookups and
//! order creator resolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named permission granted through a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: Uuid,
    pub name: String,
}

/// A role such as `ROLE_ADMIN`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub permissions: Vec<Permission>,
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login name; matches the `sub` claim of issued tokens
    pub username: String,

    pub first_name: String,
    pub last_name: String,
    pub email: String,

    /// Whether the account is active
    pub enabled: bool,

    pub roles: Vec<Role>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new enabled user without roles
    pub fn new(
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            enabled: true,
            roles: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Adds a role
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// "First Last", skipping blank parts
    pub fn full_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Role names followed by the permission names they grant
    pub fn authorities(&self) -> Vec<String> {
        let mut authorities: Vec<String> = self.roles.iter().map(|role| role.name.clone()).collect();
        for permission in self.roles.iter().flat_map(|role| &role.permissions) {
            if !authorities.contains(&permission.name) {
                authorities.push(permission.name.clone());
            }
        }
        authorities
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            full_name: self.full_name(),
        }
    }
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            permissions: Vec::new(),
        }
    }

    pub fn with_permission(mut self, name: impl Into<String>) -> Self {
        self.permissions.push(Permission {
            id: Uuid::new_v4(),
            name: name.into(),
        });
        self
    }
}

/// The creator reference embedded in an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
}
