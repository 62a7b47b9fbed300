use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use om_core::domain::entities::{Permission, Role, User};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionResponse {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleResponse {
    pub id: Uuid,
    pub name: String,
    pub permissions: Vec<PermissionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub enabled: bool,
    pub roles: Vec<RoleResponse>,
    pub authorities: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Permission> for PermissionResponse {
    fn from(permission: Permission) -> Self {
        Self {
            id: permission.id,
            name: permission.name,
        }
    }
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            permissions: role.permissions.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<User> for UserProfileResponse {
    fn from(user: User) -> Self {
        let full_name = user.full_name();
        let authorities = user.authorities();
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            full_name,
            email: user.email,
            enabled: user.enabled,
            roles: user.roles.into_iter().map(Into::into).collect(),
            authorities,
            created_at: user.created_at,
        }
    }
}
