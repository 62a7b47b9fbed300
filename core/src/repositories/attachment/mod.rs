#[path = "trait.rs"]
mod trait_;
mod mock;

pub use mock::MockAttachmentRepository;
pub use trait_::AttachmentRepository;
