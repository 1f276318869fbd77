//! Shared key derivation for storage backends.
//!
//! Key format: the base name of the staged file. Derivation is centralized
//! here so all backends and the uploader stay consistent.

use std::path::Path;

use crate::traits::{StorageError, StorageResult};

/// Derive the object key for a staged file: its base name.
///
/// Same-named files map to the same key; a later upload overwrites the
/// earlier object.
pub fn object_key(path: &Path) -> StorageResult<String> {
    let name = path.file_name().ok_or_else(|| {
        StorageError::InvalidKey(format!("Path has no file name: {}", path.display()))
    })?;
    let name = name.to_str().ok_or_else(|| {
        StorageError::InvalidKey(format!("File name is not valid UTF-8: {}", path.display()))
    })?;
    Ok(name.to_string())
}
