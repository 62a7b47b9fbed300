//! Repository interfaces and in-memory implementations.
//!
//! Each repository is an async trait implemented by the MySQL layer in
//! `om_infra`. The `Mock*Repository` types keep state in memory and back the
//! unit tests as well as the API integration tests.

pub mod attachment;
pub mod driver;
pub mod order;
pub mod order_status;
pub mod user;

pub use attachment::{AttachmentRepository, MockAttachmentRepository};
pub use driver::{DriverRepository, MockDriverRepository};
pub use order::{MockOrderRepository, OrderFilter, OrderRepository};
pub use order_status::{MockOrderStatusRepository, OrderStatusRepository};
pub use user::{MockUserRepository, UserRepository};
