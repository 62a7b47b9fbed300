//! Request and response bodies for the HTTP surface

pub mod attachment;
pub mod driver;
pub mod order;
pub mod user;

pub use attachment::{AttachmentSummary, AttachmentTypeResponse, UploadAttachmentRequest};
pub use driver::{CreateDriverRequest, DriverResponse, DriverSearchQuery, DriverSummary, ToggleDriverStatusRequest};
pub use order::{
    AssignDriverRequest, CreateOrderRequest, OrderFilterRequest, OrderResponse, OrderStatusResponse,
    StatusSummary, UpdateOrderStatusRequest,
};
pub use user::{PermissionResponse, RoleResponse, UserProfileResponse};
