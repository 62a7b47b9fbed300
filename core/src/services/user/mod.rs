//! Profile lookup for the authenticated caller

mod service;

pub use service::UserProfileService;
