//! Created-file handler trait
//!
//! The watch loop calls `handle_created` once per created file; the daemon
//! implements this trait with its uploader.

use async_trait::async_trait;
use std::path::Path;

/// Handler for files created under the watched directory.
#[async_trait]
pub trait CreatedFileHandler: Send + Sync {
    /// Process one created file and return the result.
    ///
    /// Failures are explicit values; the watch loop decides whether to
    /// continue or escalate based on its configured policy.
    async fn handle_created(&self, path: &Path) -> anyhow::Result<()>;
}
