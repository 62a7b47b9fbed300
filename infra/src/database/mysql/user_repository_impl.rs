//! MySQL implementation of the UserRepository trait.
//!
//! Roles and permissions come back as one joined row per
//! (role, permission) pair and are folded into the `User` here.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use om_core::domain::entities::{Permission, Role, User};
use om_core::errors::DomainError;
use om_core::repositories::UserRepository;

use super::{column, optional_uuid_column, query_error, uuid_column};

const SELECT_USER_WITH_ROLES: &str = r#"
    SELECT u.id, u.username, u.first_name, u.last_name, u.email, u.enabled,
           u.created_at, u.updated_at,
           r.id AS role_id, r.name AS role_name,
           p.id AS permission_id, p.name AS permission_name
    FROM users u
    LEFT JOIN user_roles ur ON ur.user_id = u.id
    LEFT JOIN roles r ON r.id = ur.role_id
    LEFT JOIN role_permissions rp ON rp.role_id = r.id
    LEFT JOIN permissions p ON p.id = rp.permission_id
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, condition: &str, value: String) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE {} ORDER BY r.name, p.name", SELECT_USER_WITH_ROLES, condition);
        let rows = sqlx::query(&query)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("Failed to find user", e))?;

        Self::rows_to_user(&rows)
    }

    fn rows_to_user(rows: &[MySqlRow]) -> Result<Option<User>, DomainError> {
        let Some(first) = rows.first() else {
            return Ok(None);
        };

        let mut user = User {
            id: uuid_column(first, "id")?,
            username: column(first, "username")?,
            first_name: column(first, "first_name")?,
            last_name: column(first, "last_name")?,
            email: column(first, "email")?,
            enabled: column(first, "enabled")?,
            roles: Vec::new(),
            created_at: column(first, "created_at")?,
            updated_at: column(first, "updated_at")?,
        };

        for row in rows {
            let Some(role_id) = optional_uuid_column(row, "role_id")? else {
                continue;
            };
            let index = match user.roles.iter().position(|role| role.id == role_id) {
                Some(index) => index,
                None => {
                    user.roles.push(Role {
                        id: role_id,
                        name: column(row, "role_name")?,
                        permissions: Vec::new(),
                    });
                    user.roles.len() - 1
                }
            };
            if let Some(permission_id) = optional_uuid_column(row, "permission_id")? {
                user.roles[index].permissions.push(Permission {
                    id: permission_id,
                    name: column(row, "permission_name")?,
                });
            }
        }

        Ok(Some(user))
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.find_one("u.username = ?", username.to_string()).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_one("u.id = ?", id.to_string()).await
    }

    async fn save(&self, user: User) -> Result<User, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_error("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO users (id, username, first_name, last_name, email, enabled, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                first_name = VALUES(first_name),
                last_name = VALUES(last_name),
                email = VALUES(email),
                enabled = VALUES(enabled),
                updated_at = VALUES(updated_at)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.enabled)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| query_error("Failed to save user", e))?;

        sqlx::query("DELETE FROM user_roles WHERE user_id = ?")
            .bind(user.id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| query_error("Failed to reset user roles", e))?;

        for role in &user.roles {
            sqlx::query("INSERT IGNORE INTO roles (id, name) VALUES (?, ?)")
                .bind(role.id.to_string())
                .bind(&role.name)
                .execute(&mut *tx)
                .await
                .map_err(|e| query_error("Failed to save role", e))?;

            sqlx::query(
                "INSERT INTO user_roles (user_id, role_id) SELECT ?, id FROM roles WHERE name = ?",
            )
            .bind(user.id.to_string())
            .bind(&role.name)
            .execute(&mut *tx)
            .await
            .map_err(|e| query_error("Failed to link user role", e))?;

            for permission in &role.permissions {
                sqlx::query("INSERT IGNORE INTO permissions (id, name) VALUES (?, ?)")
                    .bind(permission.id.to_string())
                    .bind(&permission.name)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| query_error("Failed to save permission", e))?;

                sqlx::query(
                    r#"
                    INSERT IGNORE INTO role_permissions (role_id, permission_id)
                    SELECT r.id, p.id FROM roles r, permissions p
                    WHERE r.name = ? AND p.name = ?
                    "#,
                )
                .bind(&role.name)
                .bind(&permission.name)
                .execute(&mut *tx)
                .await
                .map_err(|e| query_error("Failed to link role permission", e))?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| query_error("Failed to commit user", e))?;

        tracing::debug!(username = %user.username, roles = user.roles.len(), "Saved user");
        Ok(user)
    }
}
