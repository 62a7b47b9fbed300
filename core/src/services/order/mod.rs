//! Order management services
//!
//! - `lifecycle` - Status state machine and driver-assignment rule
//! - `service` - Order use cases built on the lifecycle
//! - `status` - Order status reference data

mod lifecycle;
mod service;
mod status;
mod types;

#[cfg(test)]
mod tests;

pub use lifecycle::OrderLifecycle;
pub use service::{generate_order_number, OrderService};
pub use status::OrderStatusService;
pub use types::NewOrder;
