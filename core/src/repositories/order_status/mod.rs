#[path = "trait.rs"]
mod trait_;
mod mock;

pub use mock::MockOrderStatusRepository;
pub use trait_::OrderStatusRepository;
