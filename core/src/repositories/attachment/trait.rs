use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Attachment, AttachmentType};
use crate::errors::DomainError;

/// Persistence for attachment types and uploaded attachments
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Find an enabled attachment type by label
    async fn find_type_by_label(&self, label: &str) -> Result<Option<AttachmentType>, DomainError>;

    /// Enabled attachment types ordered by label
    async fn find_active_types(&self) -> Result<Vec<AttachmentType>, DomainError>;

    async fn type_exists(&self, label: &str) -> Result<bool, DomainError>;

    async fn save_type(&self, attachment_type: AttachmentType) -> Result<AttachmentType, DomainError>;

    async fn save_attachment(&self, attachment: Attachment) -> Result<Attachment, DomainError>;

    /// Delete an attachment record that was never linked to an order
    async fn delete_attachment(&self, id: Uuid) -> Result<(), DomainError>;
}
