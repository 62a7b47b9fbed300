//! Attachment and attachment type entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A category of attachment with the file extensions it accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentType {
    pub id: Uuid,

    /// e.g. `PDF`, `IMAGE`
    pub type_label: String,

    /// Comma-separated, dot-prefixed extensions, e.g. `.png,.jpg,.jpeg`
    pub allowed_extensions: String,

    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AttachmentType {
    pub fn new(type_label: impl Into<String>, allowed_extensions: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            type_label: type_label.into(),
            allowed_extensions: allowed_extensions.into(),
            enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Lowercased allowed extensions
    pub fn extensions(&self) -> Vec<String> {
        self.allowed_extensions
            .split(',')
            .map(|ext| ext.trim().to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect()
    }

    /// Whether `file_name` ends in one of the allowed extensions
    pub fn allows(&self, file_name: &str) -> bool {
        match file_extension(file_name) {
            Some(ext) => self.extensions().iter().any(|allowed| *allowed == ext),
            None => false,
        }
    }
}

/// The lowercased extension of `file_name` including its dot
pub fn file_extension(file_name: &str) -> Option<String> {
    file_name
        .rfind('.')
        .map(|idx| file_name[idx..].to_lowercase())
        .filter(|ext| ext.len() > 1)
}

/// A stored file attached to an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Uuid,

    /// Original file name as uploaded
    pub file_name: String,

    /// Location written by the file store
    pub file_path: String,

    pub file_size_bytes: i64,
    pub attachment_type: AttachmentType,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Attachment {
    pub fn new(
        file_name: String,
        file_path: String,
        file_size_bytes: i64,
        attachment_type: AttachmentType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            file_name,
            file_path,
            file_size_bytes,
            attachment_type,
            enabled: true,
            created_at: now,
            updated_at: now,
        }
    }
}
