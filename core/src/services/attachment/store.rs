//! File storage abstraction for uploaded attachments

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

/// Where attachment bytes end up
///
/// The local-disk implementation lives in the infrastructure crate.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Write `bytes` under `file_name`, replacing any existing file
    ///
    /// # Returns
    /// The stored location, recorded as the attachment's file path
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<String, DomainError>;

    /// Delete a file previously returned by [`store`](Self::store)
    ///
    /// Removing a location that no longer exists is not an error.
    async fn remove(&self, location: &str) -> Result<(), DomainError>;
}

/// In-memory file store
#[derive(Clone, Default)]
pub struct MockFileStore {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MockFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, location: &str) -> Option<Vec<u8>> {
        self.files.read().await.get(location).cloned()
    }

    pub async fn file_count(&self) -> usize {
        self.files.read().await.len()
    }
}

#[async_trait]
impl FileStore for MockFileStore {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<String, DomainError> {
        let location = format!("memory://{}", file_name);
        self.files.write().await.insert(location.clone(), bytes.to_vec());
        Ok(location)
    }

    async fn remove(&self, location: &str) -> Result<(), DomainError> {
        self.files.write().await.remove(location);
        Ok(())
    }
}
