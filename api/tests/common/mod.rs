//! Shared fixtures for the HTTP integration tests
//!
//! Builds the full application on in-memory repositories with seeded
//! statuses, attachment types and three users of increasing privilege.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use serde_json::Value;

use om_api::app::{AppState, Backends};
use om_api::config::token_authenticator;
use om_core::domain::entities::authorities::{ROLE_ADMIN, ROLE_MODERATOR, ROLE_USER};
use om_core::domain::entities::{Role, User};
use om_core::repositories::{
    MockAttachmentRepository, MockDriverRepository, MockOrderRepository, MockOrderStatusRepository,
    MockUserRepository,
};
use om_core::services::{MockFileStore, TokenAuthenticator, TokenConfig, TokenIssuer};
use om_shared::{AppConfig, JwtConfig};

pub const TEST_SECRET: &str = "integration-test-secret-with-some-length";
pub const MAX_FILE_SIZE: usize = 1024;

pub const USER: &str = "alice";
pub const MODERATOR: &str = "morgan";
pub const ADMIN: &str = "root";

pub struct TestContext {
    pub config: AppConfig,
    pub state: web::Data<AppState>,
    pub authenticator: Arc<TokenAuthenticator>,
    pub issuer: TokenIssuer,
    pub users: MockUserRepository,
    pub file_store: MockFileStore,
}

impl TestContext {
    pub async fn new() -> Self {
        let config = AppConfig {
            auth: JwtConfig::new(TEST_SECRET),
            ..AppConfig::development()
        };

        let users = MockUserRepository::with_users([
            User::new(USER, "Alice", "Liddell", "alice@example.com")
                .with_role(Role::new(ROLE_USER).with_permission("order:read")),
            User::new(MODERATOR, "Morgan", "", "morgan@example.com")
                .with_role(Role::new(ROLE_MODERATOR)),
            User::new(ADMIN, "Ada", "Root", "root@example.com").with_role(Role::new(ROLE_ADMIN)),
        ]);
        let file_store = MockFileStore::new();

        let backends = Backends {
            users: Arc::new(users.clone()),
            order_statuses: Arc::new(MockOrderStatusRepository::new()),
            orders: Arc::new(MockOrderRepository::new()),
            drivers: Arc::new(MockDriverRepository::new()),
            attachments: Arc::new(MockAttachmentRepository::new()),
            file_store: Arc::new(file_store.clone()),
        };
        let state = web::Data::new(AppState::new(backends, MAX_FILE_SIZE));
        state
            .order_statuses
            .initialize_default_statuses()
            .await
            .expect("statuses seed");
        state
            .attachments
            .initialize_default_attachment_types()
            .await
            .expect("attachment types seed");

        Self {
            authenticator: token_authenticator(&config),
            issuer: TokenIssuer::new(&TokenConfig::from(&config.auth)),
            config,
            state,
            users,
            file_store,
        }
    }

    /// Access token carrying the authorities the fixture user actually has
    pub fn token_for(&self, username: &str) -> String {
        let authorities: &[&str] = match username {
            ADMIN => &[ROLE_ADMIN],
            MODERATOR => &[ROLE_MODERATOR],
            _ => &[ROLE_USER, "order:read"],
        };
        self.issuer
            .issue_access_token(username, authorities.iter().copied())
            .expect("token")
    }

    pub fn bearer(&self, username: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.token_for(username)))
    }
}

/// `data` of an `ApiResponse` body
pub fn data(body: &Value) -> &Value {
    &body["data"]
}
