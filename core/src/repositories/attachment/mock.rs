//! In-memory implementation of AttachmentRepository

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Attachment, AttachmentType};
use crate::errors::DomainError;

use super::trait_::AttachmentRepository;

#[derive(Clone, Default)]
pub struct MockAttachmentRepository {
    types: Arc<RwLock<Vec<AttachmentType>>>,
    attachments: Arc<RwLock<Vec<Attachment>>>,
}

impl MockAttachmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored attachments, in insertion order
    pub async fn attachments(&self) -> Vec<Attachment> {
        self.attachments.read().await.clone()
    }
}

#[async_trait]
impl AttachmentRepository for MockAttachmentRepository {
    async fn find_type_by_label(&self, label: &str) -> Result<Option<AttachmentType>, DomainError> {
        let types = self.types.read().await;
        Ok(types.iter().find(|t| t.enabled && t.type_label == label).cloned())
    }

    async fn find_active_types(&self) -> Result<Vec<AttachmentType>, DomainError> {
        let types = self.types.read().await;
        let mut active: Vec<AttachmentType> = types.iter().filter(|t| t.enabled).cloned().collect();
        active.sort_by(|a, b| a.type_label.cmp(&b.type_label));
        Ok(active)
    }

    async fn type_exists(&self, label: &str) -> Result<bool, DomainError> {
        let types = self.types.read().await;
        Ok(types.iter().any(|t| t.type_label == label))
    }

    async fn save_type(&self, attachment_type: AttachmentType) -> Result<AttachmentType, DomainError> {
        let mut types = self.types.write().await;
        match types.iter_mut().find(|t| t.id == attachment_type.id) {
            Some(existing) => *existing = attachment_type.clone(),
            None => types.push(attachment_type.clone()),
        }
        Ok(attachment_type)
    }

    async fn save_attachment(&self, attachment: Attachment) -> Result<Attachment, DomainError> {
        let mut attachments = self.attachments.write().await;
        attachments.push(attachment.clone());
        Ok(attachment)
    }

    async fn delete_attachment(&self, id: Uuid) -> Result<(), DomainError> {
        self.attachments.write().await.retain(|a| a.id != id);
        Ok(())
    }
}
