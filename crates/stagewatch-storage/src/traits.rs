//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use stagewatch_core::StorageBackend;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait.
/// This allows the uploader to work with any storage backend without
/// coupling to specific implementation details.
///
/// **Key format:** keys are the staged file's base name. See the crate root
/// documentation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `data` as a single object under `key`, overwriting any
    /// existing object with the same key.
    async fn upload(&self, key: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Fetch the full contents of the object stored under `key`.
    async fn download(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Check if an object exists under `key`.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
