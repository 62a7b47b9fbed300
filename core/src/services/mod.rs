//! Business services containing domain logic and use cases.

pub mod attachment;
pub mod driver;
pub mod order;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use attachment::{AttachmentService, FileStore, MockFileStore};
pub use driver::{DriverService, NewDriver};
pub use order::{NewOrder, OrderLifecycle, OrderService, OrderStatusService};
pub use token::{TokenAuthenticator, TokenConfig, TokenIssuer};
pub use user::UserProfileService;
