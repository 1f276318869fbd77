//! Stagewatch Storage Library
//!
//! This crate provides the storage abstraction and implementations for
//! stagewatch. It includes the Storage trait and backends for S3 and the
//! local filesystem.
//!
//! # Object key format
//!
//! Keys are flat: the base name of the staged file, derived in the `keys`
//! module. Two files with the same base name map to the same key, and a
//! later upload overwrites the earlier object.
//!
//! Keys must not contain `..`, a leading `/`, or path separators.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::object_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use stagewatch_core::StorageBackend;
pub use traits::{Storage, StorageError, StorageResult};
