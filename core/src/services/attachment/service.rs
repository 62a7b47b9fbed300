//! Attachment service implementation

use std::path::Path;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::{Attachment, AttachmentType};
use crate::errors::{DomainError, DomainResult, OrderError};
use crate::repositories::AttachmentRepository;

use super::store::FileStore;

/// Attachment types seeded at startup: label and allowed extensions
pub const DEFAULT_ATTACHMENT_TYPES: [(&str, &str); 2] =
    [("PDF", ".pdf"), ("IMAGE", ".png,.jpg,.jpeg")];

/// Validates and stores uploaded files
pub struct AttachmentService {
    repository: Arc<dyn AttachmentRepository>,
    store: Arc<dyn FileStore>,
    max_file_size: usize,
}

impl AttachmentService {
    pub fn new(
        repository: Arc<dyn AttachmentRepository>,
        store: Arc<dyn FileStore>,
        max_file_size: usize,
    ) -> Self {
        Self {
            repository,
            store,
            max_file_size,
        }
    }

    /// Stores an upload and records it as an attachment
    ///
    /// The stored file is named `<uuid>_<original name>` so uploads never
    /// collide; the record keeps the original name. If the record cannot be
    /// saved the stored file is removed again.
    ///
    /// # Errors
    ///
    /// * `DomainError::NotFound` - Unknown attachment type
    /// * `DomainError::Order(InvalidFileType)` - Extension not allowed for the type
    /// * `DomainError::Validation` - Empty name, empty or oversized content
    pub async fn upload_attachment(
        &self,
        type_label: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> DomainResult<Attachment> {
        let file_name = base_name(file_name).ok_or_else(|| DomainError::Validation {
            message: "File name is required".to_string(),
        })?;
        tracing::info!(%file_name, %type_label, "Uploading attachment");

        let attachment_type = self
            .repository
            .find_type_by_label(type_label)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Attachment type not found: {}", type_label)))?;

        if !attachment_type.allows(&file_name) {
            return Err(OrderError::InvalidFileType {
                allowed: attachment_type.allowed_extensions.clone(),
            }
            .into());
        }

        if bytes.is_empty() {
            return Err(DomainError::Validation {
                message: "File content is empty".to_string(),
            });
        }
        if bytes.len() > self.max_file_size {
            return Err(DomainError::Validation {
                message: format!("File exceeds the maximum size of {} bytes", self.max_file_size),
            });
        }

        let unique_name = format!("{}_{}", Uuid::new_v4(), file_name);
        let location = self.store.store(&unique_name, bytes).await?;

        let size = i64::try_from(bytes.len()).map_err(|_| DomainError::internal("File size overflow"))?;
        let attachment = Attachment::new(file_name, location, size, attachment_type);
        let location = attachment.file_path.clone();
        let attachment = match self.repository.save_attachment(attachment).await {
            Ok(attachment) => attachment,
            Err(e) => {
                self.remove_file(&location).await;
                return Err(e);
            }
        };

        tracing::info!(attachment_id = %attachment.id, "Attachment uploaded successfully");
        Ok(attachment)
    }

    /// Undo an upload that could not be linked to its order
    ///
    /// Deletes the record and then the stored file. Failures are logged and
    /// swallowed so the caller can still report the original error.
    pub async fn discard_attachment(&self, attachment: &Attachment) {
        tracing::info!(attachment_id = %attachment.id, "Discarding unlinked attachment");
        if let Err(e) = self.repository.delete_attachment(attachment.id).await {
            tracing::warn!(attachment_id = %attachment.id, error = %e, "Failed to delete attachment record");
        }
        self.remove_file(&attachment.file_path).await;
    }

    async fn remove_file(&self, location: &str) {
        if let Err(e) = self.store.remove(location).await {
            tracing::warn!(%location, error = %e, "Failed to remove orphaned attachment file");
        }
    }

    pub async fn list_attachment_types(&self) -> DomainResult<Vec<AttachmentType>> {
        self.repository.find_active_types().await
    }

    /// Seeds `PDF` and `IMAGE` if missing; returns how many were created
    pub async fn initialize_default_attachment_types(&self) -> DomainResult<usize> {
        let mut created = 0;
        for (label, extensions) in DEFAULT_ATTACHMENT_TYPES {
            if !self.repository.type_exists(label).await? {
                self.repository
                    .save_type(AttachmentType::new(label, extensions))
                    .await?;
                tracing::info!(%label, "Created default attachment type");
                created += 1;
            }
        }
        Ok(created)
    }
}

/// Final path component of a client-supplied file name
fn base_name(file_name: &str) -> Option<String> {
    let normalized = file_name.replace('\\', "/");
    Path::new(&normalized)
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::repositories::MockAttachmentRepository;
    use crate::services::attachment::MockFileStore;

    /// Delegates to the mock but refuses to save attachments
    struct RejectingRepository(MockAttachmentRepository);

    #[async_trait]
    impl AttachmentRepository for RejectingRepository {
        async fn find_type_by_label(&self, label: &str) -> DomainResult<Option<AttachmentType>> {
            self.0.find_type_by_label(label).await
        }

        async fn find_active_types(&self) -> DomainResult<Vec<AttachmentType>> {
            self.0.find_active_types().await
        }

        async fn type_exists(&self, label: &str) -> DomainResult<bool> {
            self.0.type_exists(label).await
        }

        async fn save_type(&self, attachment_type: AttachmentType) -> DomainResult<AttachmentType> {
            self.0.save_type(attachment_type).await
        }

        async fn save_attachment(&self, _attachment: Attachment) -> DomainResult<Attachment> {
            Err(DomainError::internal("database unavailable"))
        }

        async fn delete_attachment(&self, id: Uuid) -> DomainResult<()> {
            self.0.delete_attachment(id).await
        }
    }

    struct Fixture {
        service: AttachmentService,
        repository: MockAttachmentRepository,
        store: MockFileStore,
    }

    async fn fixture() -> Fixture {
        let repository = MockAttachmentRepository::new();
        let store = MockFileStore::new();
        let service = AttachmentService::new(
            Arc::new(repository.clone()),
            Arc::new(store.clone()),
            1024,
        );
        service.initialize_default_attachment_types().await.unwrap();
        Fixture {
            service,
            repository,
            store,
        }
    }

    #[tokio::test]
    async fn test_default_types_seeded_once() {
        let f = fixture().await;
        assert_eq!(f.service.initialize_default_attachment_types().await.unwrap(), 0);

        let labels: Vec<String> = f
            .service
            .list_attachment_types()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.type_label)
            .collect();
        assert_eq!(labels, vec!["IMAGE", "PDF"]);
    }

    #[tokio::test]
    async fn test_upload_stores_file_under_unique_name() {
        let f = fixture().await;
        let attachment = f
            .service
            .upload_attachment("IMAGE", "Proof.JPG", b"jpeg-bytes")
            .await
            .unwrap();

        assert_eq!(attachment.file_name, "Proof.JPG");
        assert_eq!(attachment.file_size_bytes, 10);
        assert!(attachment.file_path.ends_with("_Proof.JPG"));
        assert_eq!(f.store.get(&attachment.file_path).await.unwrap(), b"jpeg-bytes");
        assert_eq!(f.repository.attachments().await.len(), 1);
    }

    #[tokio::test]
    async fn test_upload_rejects_wrong_extension() {
        let f = fixture().await;
        let err = f
            .service
            .upload_attachment("PDF", "photo.png", b"png")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Order(OrderError::InvalidFileType { .. })));
        assert_eq!(err.to_string(), "Invalid file type. Allowed extensions: .pdf");
        assert!(f.repository.attachments().await.is_empty());
    }

    #[tokio::test]
    async fn test_upload_unknown_type() {
        let f = fixture().await;
        let err = f
            .service
            .upload_attachment("VIDEO", "clip.mp4", b"x")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Attachment type not found: VIDEO");
    }

    #[tokio::test]
    async fn test_upload_size_limits() {
        let f = fixture().await;
        assert!(f.service.upload_attachment("PDF", "a.pdf", b"").await.is_err());
        assert!(f
            .service
            .upload_attachment("PDF", "a.pdf", &vec![0u8; 1025])
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_failed_save_removes_stored_file() {
        let repository = MockAttachmentRepository::new();
        let store = MockFileStore::new();
        let seeding = AttachmentService::new(Arc::new(repository.clone()), Arc::new(store.clone()), 1024);
        seeding.initialize_default_attachment_types().await.unwrap();
        let service = AttachmentService::new(
            Arc::new(RejectingRepository(repository.clone())),
            Arc::new(store.clone()),
            1024,
        );

        let err = service
            .upload_attachment("PDF", "report.pdf", b"%PDF")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Internal error: database unavailable");
        assert_eq!(store.file_count().await, 0);
        assert!(repository.attachments().await.is_empty());
    }

    #[tokio::test]
    async fn test_discard_removes_record_and_file() {
        let f = fixture().await;
        let kept = f.service.upload_attachment("PDF", "kept.pdf", b"keep").await.unwrap();
        let dropped = f.service.upload_attachment("PDF", "dropped.pdf", b"drop").await.unwrap();

        f.service.discard_attachment(&dropped).await;

        let remaining = f.repository.attachments().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept.id);
        assert!(f.store.get(&dropped.file_path).await.is_none());
        assert_eq!(f.store.get(&kept.file_path).await.unwrap(), b"keep");
    }

    #[test]
    fn test_base_name_strips_directories() {
        assert_eq!(base_name("../../etc/passwd.pdf").as_deref(), Some("passwd.pdf"));
        assert_eq!(base_name("C:\\docs\\scan.pdf").as_deref(), Some("scan.pdf"));
        assert_eq!(base_name("  "), None);
        assert_eq!(base_name(""), None);
    }
}
