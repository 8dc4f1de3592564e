//! Shared key generation for storage backends.
//!
//! Key format: `{owner_id}/{file_name}`. All backends must use this format
//! for consistency; the owner prefix is the only ownership record.

use crate::traits::{StorageError, StorageResult};
use uuid::Uuid;

/// Generate a storage key for the given owner and file name.
///
/// Rejects names that would escape the owner's prefix (`..`, a leading or
/// embedded `/`) or that are empty.
pub fn object_key(owner_id: Uuid, file_name: &str) -> StorageResult<String> {
    validate_file_name(file_name)?;
    Ok(format!("{}/{}", owner_id, file_name))
}

/// Validate a full storage key as produced by [`object_key`].
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.contains("..") || storage_key.starts_with('/') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

/// The file-name component of a storage key.
pub fn file_name_from_key(storage_key: &str) -> &str {
    storage_key
        .rsplit_once('/')
        .map(|(_, name)| name)
        .unwrap_or(storage_key)
}

fn validate_file_name(file_name: &str) -> StorageResult<()> {
    if file_name.trim().is_empty() {
        return Err(StorageError::InvalidKey(
            "File name must not be empty".to_string(),
        ));
    }
    if file_name.contains("..") || file_name.contains('/') || file_name.contains('\\') {
        return Err(StorageError::InvalidKey(
            "File name contains invalid characters".to_string(),
        ));
    }
    Ok(())
}
