use crate::keys;
use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pacta_core::config::StorageBackend;
use pacta_core::models::{mimetype_for_name, ObjectMetadata, StoredObject};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/pacta/contracts")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Convert storage key to filesystem path with security validation
    ///
    /// This function validates that the storage key doesn't contain path
    /// traversal sequences that could escape the base storage directory.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        keys::validate_key(storage_key)?;

        let path = self.base_path.join(storage_key);

        let base_canonical = self.base_path.canonicalize().map_err(|e| {
            StorageError::ConfigError(format!("Failed to canonicalize base path: {}", e))
        })?;

        if let Ok(canonical) = path.canonicalize() {
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidKey(
                    "Storage key resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(path)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    fn listing_entry(storage_key: &str, meta: &std::fs::Metadata) -> StoredObject {
        let name = keys::file_name_from_key(storage_key).to_string();
        let created_at: DateTime<Utc> = meta
            .created()
            .or_else(|_| meta.modified())
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        let last_accessed_at: DateTime<Utc> = meta
            .accessed()
            .or_else(|_| meta.modified())
            .map(DateTime::<Utc>::from)
            .unwrap_or(created_at);

        StoredObject {
            id: Uuid::new_v5(&Uuid::NAMESPACE_URL, storage_key.as_bytes()),
            metadata: ObjectMetadata {
                size: meta.len(),
                mimetype: mimetype_for_name(&name).map(String::from),
            },
            name,
            created_at,
            last_accessed_at,
        }
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(
        &self,
        owner_id: Uuid,
        file_name: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String> {
        let key = keys::object_key(owner_id, file_name)?;
        let path = self.key_to_path(&key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(key)
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        let path = self.key_to_path(storage_key)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(storage_key.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(data)
    }

    async fn list(&self, owner_id: Uuid) -> StorageResult<Vec<StoredObject>> {
        let prefix_dir = self.base_path.join(owner_id.to_string());
        let start = std::time::Instant::now();

        if !fs::try_exists(&prefix_dir).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&prefix_dir).await.map_err(|e| {
            StorageError::ListFailed(format!(
                "Failed to read directory {}: {}",
                prefix_dir.display(),
                e
            ))
        })?;

        let mut objects = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::ListFailed(e.to_string()))?
        {
            let meta = entry
                .metadata()
                .await
                .map_err(|e| StorageError::ListFailed(e.to_string()))?;
            if !meta.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            let key = format!("{}/{}", owner_id, name);
            objects.push(Self::listing_entry(&key, &meta));
        }

        objects.sort_by(|a, b| a.name.cmp(&b.name));

        tracing::info!(
            owner_id = %owner_id,
            count = objects.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage list successful"
        );

        Ok(objects)
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let path = self.key_to_path(storage_key)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage delete successful"
        );

        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(storage_key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_local_storage_upload_download() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let owner_id = Uuid::new_v4();
        let data = b"test contract".to_vec();

        let key = storage
            .upload(owner_id, "contract.pdf", "application/pdf", data.clone())
            .await
            .unwrap();

        assert_eq!(key, format!("{}/contract.pdf", owner_id));

        let downloaded = storage.download(&key).await.unwrap();
        assert_eq!(data, downloaded);
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let result = storage.download("../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.delete("../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.exists("/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_local_storage_delete_nonexistent_is_ok() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let owner_id = Uuid::new_v4();
        let result = storage.delete(&format!("{}/missing.pdf", owner_id)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_local_storage_list_empty_owner() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let objects = storage.list(Uuid::new_v4()).await.unwrap();
        assert!(objects.is_empty());
    }

    #[tokio::test]
    async fn test_local_storage_list_reports_metadata() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let owner_id = Uuid::new_v4();
        storage
            .upload(owner_id, "contract.pdf", "application/pdf", vec![0u8; 2048])
            .await
            .unwrap();
        storage
            .upload(owner_id, "Invoice.pdf", "application/pdf", vec![0u8; 512])
            .await
            .unwrap();

        let objects = storage.list(owner_id).await.unwrap();
        assert_eq!(objects.len(), 2);

        let contract = objects.iter().find(|o| o.name == "contract.pdf").unwrap();
        assert_eq!(contract.metadata.size, 2048);
        assert_eq!(
            contract.metadata.mimetype.as_deref(),
            Some("application/pdf")
        );
    }

    #[tokio::test]
    async fn test_listing_ids_stable_across_calls() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let owner_id = Uuid::new_v4();
        storage
            .upload(owner_id, "contract.pdf", "application/pdf", b"x".to_vec())
            .await
            .unwrap();

        let first = storage.list(owner_id).await.unwrap();
        let second = storage.list(owner_id).await.unwrap();
        assert_eq!(first[0].id, second[0].id);
    }

    #[tokio::test]
    async fn test_listing_scoped_to_owner() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let owner_a = Uuid::new_v4();
        let owner_b = Uuid::new_v4();
        storage
            .upload(owner_a, "a.pdf", "application/pdf", b"a".to_vec())
            .await
            .unwrap();
        storage
            .upload(owner_b, "b.pdf", "application/pdf", b"b".to_vec())
            .await
            .unwrap();

        let listing = storage.list(owner_a).await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].name, "a.pdf");
    }
}
