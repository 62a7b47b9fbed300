//! Local-disk implementation of the `FileStore` trait.

use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use om_core::errors::DomainError;
use om_core::services::FileStore;

use crate::InfrastructureError;

/// Stores uploaded files in a single directory on local disk
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    directory: PathBuf,
}

impl LocalFileStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Create the upload directory (and parents) if it is missing
    pub async fn ensure_directory(&self) -> Result<(), InfrastructureError> {
        tokio::fs::create_dir_all(&self.directory).await?;
        tracing::info!(directory = %self.directory.display(), "Upload directory ready");
        Ok(())
    }

    /// Only bare file names are accepted; anything with a path component is rejected
    fn resolve(&self, file_name: &str) -> Result<PathBuf, DomainError> {
        match Path::new(file_name).file_name() {
            Some(name) if name == OsStr::new(file_name) => Ok(self.directory.join(name)),
            _ => Err(DomainError::Validation {
                message: format!("Invalid file name: {}", file_name),
            }),
        }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<String, DomainError> {
        let path = self.resolve(file_name)?;

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to create upload directory: {}", e)))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to store file {}: {}", file_name, e)))?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Stored attachment file");
        Ok(path.to_string_lossy().into_owned())
    }

    async fn remove(&self, location: &str) -> Result<(), DomainError> {
        let path = Path::new(location);
        if path.parent() != Some(self.directory.as_path()) {
            return Err(DomainError::Validation {
                message: format!("Not an upload location: {}", location),
            });
        }

        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Removed attachment file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::internal(format!("Failed to remove file {}: {}", location, e))),
        }
    }
}
