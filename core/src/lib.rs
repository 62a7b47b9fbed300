//! # Order Management Core
//!
//! Domain entities, services, repository interfaces and error types for the
//! order management backend. Two pieces carry the real logic:
//! `services::token::TokenAuthenticator` (stateless bearer-token
//! verification) and `services::order::OrderLifecycle` (the order status
//! state machine).

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    authorities, Attachment, AttachmentType, AuthenticatedIdentity, Claims, Driver, Order,
    OrderStatus, OrderStatusLabel, Permission, Role, User, UserSummary,
};
pub use errors::{DomainError, DomainResult, OrderError, TokenError};
pub use repositories::{
    AttachmentRepository, DriverRepository, OrderFilter, OrderRepository, OrderStatusRepository,
    UserRepository,
};
pub use services::{
    AttachmentService, DriverService, FileStore, NewDriver, NewOrder, OrderLifecycle,
    OrderService, OrderStatusService, TokenAuthenticator, TokenConfig, TokenIssuer,
    UserProfileService,
};
