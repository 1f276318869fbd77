//! Configuration module
//!
//! Configuration is entirely environment-driven (a `.env` file is honored).
//! Credentials and storage settings are read once at startup into a scoped
//! [`Config`] value and passed by reference into the storage factory.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::storage_types::StorageBackend;

const DEFAULT_WATCH_SUBDIR: &str = "staging";
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// What the watch loop does when handling a created file fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the error and keep watching.
    #[default]
    LogAndContinue,
    /// Stop the watch loop and propagate the error.
    Escalate,
}

impl FromStr for FailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "continue" => Ok(FailurePolicy::LogAndContinue),
            "stop" => Ok(FailurePolicy::Escalate),
            _ => Err(anyhow::anyhow!(
                "Invalid upload error policy: {} (expected 'continue' or 'stop')",
                s
            )),
        }
    }
}

/// Application configuration, immutable for the process lifetime.
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory watched for newly created files. Always absolute.
    pub watch_dir: PathBuf,
    // Storage configuration
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub aws_region: Option<String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub local_storage_path: Option<String>,
    // Watch loop behavior
    pub failure_policy: FailurePolicy,
    pub channel_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let watch_dir = match env::var("STAGEWATCH_WATCH_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::home_dir()
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "Cannot determine home directory; set STAGEWATCH_WATCH_DIR explicitly"
                    )
                })?
                .join(DEFAULT_WATCH_SUBDIR),
        };

        let storage_backend = env::var("STORAGE_BACKEND")
            .ok()
            .and_then(|s| StorageBackend::from_str(&s).ok());

        let failure_policy = match env::var("STAGEWATCH_ON_UPLOAD_ERROR") {
            Ok(s) => FailurePolicy::from_str(&s)?,
            Err(_) => FailurePolicy::default(),
        };

        let config = Config {
            watch_dir,
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            aws_region: env::var("AWS_REGION").ok(),
            aws_access_key_id: env::var("AWS_ACCESS_KEY_ID").ok(),
            aws_secret_access_key: env::var("AWS_SECRET_ACCESS_KEY").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            failure_policy,
            channel_capacity: env::var("STAGEWATCH_CHANNEL_CAPACITY")
                .unwrap_or_else(|_| DEFAULT_CHANNEL_CAPACITY.to_string())
                .parse()
                .unwrap_or(DEFAULT_CHANNEL_CAPACITY),
        };

        config.validate()?;
        Ok(config)
    }

    /// Region for the S3 backend, preferring `S3_REGION` over `AWS_REGION`.
    pub fn region(&self) -> Option<&str> {
        self.s3_region.as_deref().or(self.aws_region.as_deref())
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.watch_dir.is_absolute() {
            return Err(anyhow::anyhow!(
                "STAGEWATCH_WATCH_DIR must be an absolute path, got {}",
                self.watch_dir.display()
            ));
        }

        if self.channel_capacity == 0 {
            return Err(anyhow::anyhow!(
                "STAGEWATCH_CHANNEL_CAPACITY must be greater than zero"
            ));
        }

        let backend = self.storage_backend.unwrap_or(StorageBackend::S3);
        match backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.region().is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}
