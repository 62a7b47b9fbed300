//! Domain entities representing core business objects.

pub mod attachment;
pub mod driver;
pub mod identity;
pub mod order;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use attachment::{Attachment, AttachmentType};
pub use driver::Driver;
pub use identity::{authorities, AuthenticatedIdentity};
pub use order::{Order, OrderStatus, OrderStatusLabel, UnknownStatusLabel};
pub use token::{Claims, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
pub use user::{Permission, Role, User, UserSummary};
