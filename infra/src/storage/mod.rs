//! Attachment file persistence

mod local;

pub use local::LocalFileStore;
