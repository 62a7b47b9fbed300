//! Driver management

mod service;

pub use service::{DriverService, NewDriver};
