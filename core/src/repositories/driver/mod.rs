#[path = "trait.rs"]
mod trait_;
mod mock;

pub use mock::MockDriverRepository;
pub use trait_::DriverRepository;
