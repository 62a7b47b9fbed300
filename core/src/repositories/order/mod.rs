#[path = "trait.rs"]
mod trait_;
mod mock;

pub use mock::MockOrderRepository;
pub use trait_::{OrderFilter, OrderRepository};
