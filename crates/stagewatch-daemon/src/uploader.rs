//! Uploader: reads a staged file and stores it under its base name.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use stagewatch_storage::{object_key, Storage, StorageError};
use stagewatch_watcher::CreatedFileHandler;
use thiserror::Error;

/// Upload operation errors
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Uploads staged files to the configured storage backend.
///
/// One blocking call per file, no retry. Failures are explicit values; the
/// watch loop applies its failure policy.
pub struct Uploader {
    storage: Arc<dyn Storage>,
}

impl Uploader {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Read `path` and store its full contents under the file's base name.
    /// Returns the object key on success.
    pub async fn upload_file(&self, path: &Path) -> Result<String, UploadError> {
        let key = object_key(path)?;

        let data = tokio::fs::read(path).await.map_err(|source| UploadError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let size = data.len();

        self.storage.upload(&key, data).await?;

        tracing::info!(key = %key, size_bytes = size, "{} uploaded", key);

        Ok(key)
    }
}

#[async_trait]
impl CreatedFileHandler for Uploader {
    async fn handle_created(&self, path: &Path) -> anyhow::Result<()> {
        self.upload_file(path).await?;
        Ok(())
    }
}
