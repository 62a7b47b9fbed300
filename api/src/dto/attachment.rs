use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use om_core::domain::entities::{Attachment, AttachmentType};
use om_core::errors::DomainError;

/// JSON upload: the file travels base64-encoded in `content`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadAttachmentRequest {
    #[validate(length(min = 1, message = "Attachment type is required"))]
    pub attachment_type: String,
    #[validate(length(min = 1, max = 255, message = "File name is required"))]
    pub file_name: String,
    #[validate(length(min = 1, message = "File content is required"))]
    pub content: String,
}

impl UploadAttachmentRequest {
    /// Decoded file bytes
    pub fn decode_content(&self) -> Result<Vec<u8>, DomainError> {
        STANDARD
            .decode(self.content.trim())
            .map_err(|e| DomainError::Validation {
                message: format!("File content is not valid base64: {}", e),
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentTypeResponse {
    pub id: Uuid,
    pub type_label: String,
    pub allowed_extensions: Vec<String>,
    pub enabled: bool,
}

impl From<AttachmentType> for AttachmentTypeResponse {
    fn from(attachment_type: AttachmentType) -> Self {
        Self {
            id: attachment_type.id,
            allowed_extensions: attachment_type.extensions(),
            type_label: attachment_type.type_label,
            enabled: attachment_type.enabled,
        }
    }
}

/// Attachment as embedded in an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentSummary {
    pub id: Uuid,
    pub file_name: String,
    pub file_size_bytes: i64,
    pub attachment_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<Attachment> for AttachmentSummary {
    fn from(attachment: Attachment) -> Self {
        Self {
            id: attachment.id,
            file_name: attachment.file_name,
            file_size_bytes: attachment.file_size_bytes,
            attachment_type: attachment.attachment_type.type_label,
            created_at: attachment.created_at,
        }
    }
}
