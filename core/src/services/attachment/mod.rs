//! Attachment upload and attachment type management

mod service;
mod store;

pub use service::{AttachmentService, DEFAULT_ATTACHMENT_TYPES};
pub use store::{FileStore, MockFileStore};
