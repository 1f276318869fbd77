//! Stagewatch daemon library: the uploader and binary plumbing.

pub mod uploader;

pub use uploader::{UploadError, Uploader};

/// Initialize tracing for the daemon binary.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
