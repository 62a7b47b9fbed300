//! Attachment upload storage configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where uploaded attachment files are written
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Upload directory, created at startup if missing
    pub directory: PathBuf,

    /// Largest accepted decoded file size in bytes
    pub max_file_size: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("uploads"),
            max_file_size: 10 * 1024 * 1024, // 10 MB
        }
    }
}
