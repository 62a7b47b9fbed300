//! Type definitions shared by the API layer
//!
//! - `pagination` - Pagination for list endpoints
//! - `response` - API response wrappers

pub mod pagination;
pub mod response;

pub use pagination::{PaginatedResponse, Pagination};
pub use response::ApiResponse;
