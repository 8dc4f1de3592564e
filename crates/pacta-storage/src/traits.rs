//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use pacta_core::config::StorageBackend;
use pacta_core::models::StoredObject;
use thiserror::Error;
use uuid::Uuid;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("List failed: {0}")]
    ListFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
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
/// All storage backends (S3-compatible, local filesystem) must implement
/// this trait so the contract workflow can run against any backend without
/// coupling to implementation details.
///
/// **Key format:** Keys are owner-scoped: `{owner_id}/{file_name}`. See the
/// crate root documentation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload a file under the owner's prefix and return its storage key.
    ///
    /// The write is atomic at single-object granularity: a failed upload
    /// leaves no partial object behind that the listing path would see.
    async fn upload(
        &self,
        owner_id: Uuid,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String>;

    /// Download a file by its storage key
    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// List all objects under the owner's prefix with their metadata.
    ///
    /// Returns an empty listing (not an error) for an owner with no objects.
    async fn list(&self, owner_id: Uuid) -> StorageResult<Vec<StoredObject>>;

    /// Delete a file by its storage key.
    ///
    /// Deleting a key that does not exist is not an error; the post-delete
    /// listing is the source of truth.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
