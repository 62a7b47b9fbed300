//! MySQL implementation of the AttachmentRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use om_core::domain::entities::{Attachment, AttachmentType};
use om_core::errors::DomainError;
use om_core::repositories::AttachmentRepository;

use super::{column, query_error, uuid_column};

const SELECT_TYPE: &str = r#"
    SELECT id, type_label, allowed_extensions, enabled, created_at, updated_at
    FROM attachment_types
"#;

/// MySQL implementation of AttachmentRepository
pub struct MySqlAttachmentRepository {
    pool: MySqlPool,
}

impl MySqlAttachmentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_type(row: &MySqlRow) -> Result<AttachmentType, DomainError> {
        Ok(AttachmentType {
            id: uuid_column(row, "id")?,
            type_label: column(row, "type_label")?,
            allowed_extensions: column(row, "allowed_extensions")?,
            enabled: column(row, "enabled")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl AttachmentRepository for MySqlAttachmentRepository {
    async fn find_type_by_label(&self, label: &str) -> Result<Option<AttachmentType>, DomainError> {
        let query = format!("{} WHERE type_label = ? AND enabled = TRUE LIMIT 1", SELECT_TYPE);
        let row = sqlx::query(&query)
            .bind(label)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to find attachment type", e))?;
        row.as_ref().map(Self::row_to_type).transpose()
    }

    async fn find_active_types(&self) -> Result<Vec<AttachmentType>, DomainError> {
        let query = format!("{} WHERE enabled = TRUE ORDER BY type_label", SELECT_TYPE);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("Failed to list attachment types", e))?;
        rows.iter().map(Self::row_to_type).collect()
    }

    async fn type_exists(&self, label: &str) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attachment_types WHERE type_label = ?")
            .bind(label)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("Failed to check attachment type", e))?;
        Ok(count > 0)
    }

    async fn save_type(&self, attachment_type: AttachmentType) -> Result<AttachmentType, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO attachment_types (id, type_label, allowed_extensions, enabled, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                allowed_extensions = VALUES(allowed_extensions),
                enabled = VALUES(enabled),
                updated_at = VALUES(updated_at)
            "#,
        )
        .bind(attachment_type.id.to_string())
        .bind(&attachment_type.type_label)
        .bind(&attachment_type.allowed_extensions)
        .bind(attachment_type.enabled)
        .bind(attachment_type.created_at)
        .bind(attachment_type.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to save attachment type", e))?;

        Ok(attachment_type)
    }

    async fn save_attachment(&self, attachment: Attachment) -> Result<Attachment, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO attachments (
                id, attachment_type_id, file_name, file_path, file_size_bytes,
                enabled, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(attachment.id.to_string())
        .bind(attachment.attachment_type.id.to_string())
        .bind(&attachment.file_name)
        .bind(&attachment.file_path)
        .bind(attachment.file_size_bytes)
        .bind(attachment.enabled)
        .bind(attachment.created_at)
        .bind(attachment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to save attachment", e))?;

        Ok(attachment)
    }

    async fn delete_attachment(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM attachments WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to delete attachment", e))?;
        Ok(())
    }
}
