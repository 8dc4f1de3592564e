//! Contract workflow service.
//!
//! Owns the four-stage pipeline (prompt -> completion -> render -> persist)
//! and the listing path over the same store. Validation always runs before
//! the corresponding in-progress flag is raised and before any external
//! call, so a rejected operation provably has no side effect. Stages are
//! awaited sequentially; there is no fan-out and no retry.

use crate::error::{completion_to_app_error, render_to_app_error, storage_to_app_error};
use crate::services::session::OpFlag;
use crate::state::AppState;
use crate::validation::validate_upload;
use chrono::Utc;
use pacta_completion::CompletionProvider;
use pacta_core::models::{mimetype_for_name, StoredObject};
use pacta_core::{AppError, Config};
use pacta_render::DocumentRenderer;
use pacta_storage::{keys, Storage};
use std::sync::Arc;
use uuid::Uuid;

/// Result of persisting a document (exported or uploaded).
#[derive(Debug, Clone)]
pub struct PersistedContract {
    pub storage_key: String,
    pub file_name: String,
    pub size_bytes: usize,
}

/// File name for an exported contract: the caller's name when supplied,
/// otherwise the current epoch milliseconds; always with the pdf extension.
pub fn export_file_name(custom: Option<&str>) -> String {
    match custom.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("{}.pdf", name),
        None => format!("{}.pdf", Utc::now().timestamp_millis()),
    }
}

/// File name for a direct upload: timestamp-prefixed original name, keeping
/// uploads of the same source file distinct.
pub fn upload_file_name(original: &str) -> String {
    format!("{}-{}", Utc::now().timestamp_millis(), original)
}

/// Case-insensitive substring filter over an already-fetched listing.
///
/// Applied after the fetch on purpose: there is no server-side search, the
/// store's listing is the source of truth and the filter is presentation.
pub fn filter_listing(objects: &[StoredObject], term: &str) -> Vec<StoredObject> {
    let term = term.to_lowercase();
    objects
        .iter()
        .filter(|object| object.name.to_lowercase().contains(&term))
        .cloned()
        .collect()
}

/// Per-action pipeline over the injected collaborators.
pub struct ContractWorkflow {
    storage: Arc<dyn Storage>,
    completion: Arc<dyn CompletionProvider>,
    renderer: Arc<dyn DocumentRenderer>,
    generating: OpFlag,
    saving: OpFlag,
}

impl ContractWorkflow {
    pub fn new(
        storage: Arc<dyn Storage>,
        completion: Arc<dyn CompletionProvider>,
        renderer: Arc<dyn DocumentRenderer>,
    ) -> Self {
        Self {
            storage,
            completion,
            renderer,
            generating: OpFlag::new(),
            saving: OpFlag::new(),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            state.storage.clone(),
            state.completion.clone(),
            state.renderer.clone(),
        )
    }

    pub fn is_generating(&self) -> bool {
        self.generating.is_raised()
    }

    pub fn is_saving(&self) -> bool {
        self.saving.is_raised()
    }

    /// Fetch a completion for the prompt.
    ///
    /// Empty prompts are rejected before the generating flag flips and
    /// before any request is opened.
    pub async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        if prompt.trim().is_empty() {
            return Err(AppError::InvalidInput("Prompt must not be empty".to_string()));
        }

        let _guard = self.generating.raise();

        self.completion
            .complete_text(prompt)
            .await
            .map_err(completion_to_app_error)
    }

    /// Render the document text to a single-page PDF and persist it under
    /// the owner's prefix.
    ///
    /// Empty text is a no-op: the saving flag never flips and nothing is
    /// rendered or uploaded.
    pub async fn export(
        &self,
        owner_id: Uuid,
        text: &str,
        file_name: Option<&str>,
    ) -> Result<PersistedContract, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Document text must not be empty".to_string(),
            ));
        }

        let _guard = self.saving.raise();

        let file_name = export_file_name(file_name);
        let pdf = self
            .renderer
            .render_pdf(text, &file_name)
            .map_err(render_to_app_error)?;
        let size_bytes = pdf.len();

        let storage_key = self
            .storage
            .upload(owner_id, &file_name, "application/pdf", pdf)
            .await
            .map_err(storage_to_app_error)?;

        tracing::info!(
            owner_id = %owner_id,
            key = %storage_key,
            size_bytes,
            "Contract exported"
        );

        Ok(PersistedContract {
            storage_key,
            file_name,
            size_bytes,
        })
    }

    /// Persist a directly uploaded file after validating it against the
    /// configured limits. Validation failures touch nothing.
    pub async fn upload(
        &self,
        config: &Config,
        owner_id: Uuid,
        original_name: &str,
        content_type: Option<&str>,
        data: Vec<u8>,
    ) -> Result<PersistedContract, AppError> {
        validate_upload(config, original_name, content_type, data.len())?;

        let _guard = self.saving.raise();

        let file_name = upload_file_name(original_name);
        let size_bytes = data.len();
        let content_type = content_type
            .map(String::from)
            .or_else(|| mimetype_for_name(original_name).map(String::from))
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let storage_key = self
            .storage
            .upload(owner_id, &file_name, &content_type, data)
            .await
            .map_err(storage_to_app_error)?;

        tracing::info!(
            owner_id = %owner_id,
            key = %storage_key,
            size_bytes,
            "Contract uploaded"
        );

        Ok(PersistedContract {
            storage_key,
            file_name,
            size_bytes,
        })
    }

    /// List the owner's documents.
    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<StoredObject>, AppError> {
        self.storage
            .list(owner_id)
            .await
            .map_err(storage_to_app_error)
    }

    /// Fetch a document's bytes and its best-effort content type.
    pub async fn download(
        &self,
        owner_id: Uuid,
        file_name: &str,
    ) -> Result<(Vec<u8>, Option<&'static str>), AppError> {
        let key = keys::object_key(owner_id, file_name).map_err(storage_to_app_error)?;
        let bytes = self
            .storage
            .download(&key)
            .await
            .map_err(storage_to_app_error)?;
        Ok((bytes, mimetype_for_name(file_name)))
    }

    /// Delete a document and return the store's fresh listing.
    ///
    /// Requires explicit confirmation; without it nothing is removed. There
    /// is no optimistic removal: the returned listing is always re-fetched
    /// from the store, even when the delete response carries nothing.
    pub async fn delete(
        &self,
        owner_id: Uuid,
        file_name: &str,
        confirmed: bool,
    ) -> Result<Vec<StoredObject>, AppError> {
        if !confirmed {
            return Err(AppError::InvalidInput(
                "Deletion requires explicit confirmation".to_string(),
            ));
        }

        let key = keys::object_key(owner_id, file_name).map_err(storage_to_app_error)?;
        self.storage
            .delete(&key)
            .await
            .map_err(storage_to_app_error)?;

        tracing::info!(owner_id = %owner_id, key = %key, "Contract deleted");

        self.list(owner_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pacta_completion::CompletionError;
    use pacta_core::config::StorageBackend;
    use pacta_render::RenderError;
    use pacta_storage::{LocalStorage, StorageError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct MockCompletion {
        calls: AtomicUsize,
        fail: bool,
    }

    impl MockCompletion {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for MockCompletion {
        async fn complete_text(&self, _prompt: &str) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(CompletionError::Transport("connection reset".to_string()))
            } else {
                Ok("SERVICE AGREEMENT".to_string())
            }
        }
    }

    struct MockRenderer {
        calls: AtomicUsize,
    }

    impl MockRenderer {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl DocumentRenderer for MockRenderer {
        fn render_pdf(&self, text: &str, _title: &str) -> Result<Vec<u8>, RenderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text.trim().is_empty() {
                return Err(RenderError::EmptyDocument);
            }
            Ok(format!("%PDF-mock {}", text.len()).into_bytes())
        }
    }

    struct FailingStorage;

    #[async_trait]
    impl Storage for FailingStorage {
        async fn upload(
            &self,
            _owner_id: Uuid,
            _file_name: &str,
            _content_type: &str,
            _data: Vec<u8>,
        ) -> Result<String, StorageError> {
            Err(StorageError::UploadFailed("bucket unreachable".to_string()))
        }

        async fn download(&self, key: &str) -> Result<Vec<u8>, StorageError> {
            Err(StorageError::NotFound(key.to_string()))
        }

        async fn list(&self, _owner_id: Uuid) -> Result<Vec<StoredObject>, StorageError> {
            Ok(Vec::new())
        }

        async fn delete(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }

        async fn exists(&self, _key: &str) -> Result<bool, StorageError> {
            Ok(false)
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::Local
        }
    }

    async fn workflow_with_dir() -> (ContractWorkflow, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path()).await.unwrap());
        let workflow = ContractWorkflow::new(
            storage,
            Arc::new(MockCompletion::new(false)),
            Arc::new(MockRenderer::new()),
        );
        (workflow, dir)
    }

    #[tokio::test]
    async fn test_generate_empty_prompt_makes_no_provider_call() {
        let dir = tempfile::tempdir().unwrap();
        let completion = Arc::new(MockCompletion::new(false));
        let storage = Arc::new(LocalStorage::new(dir.path()).await.unwrap());
        let workflow = ContractWorkflow::new(storage, completion.clone(), Arc::new(MockRenderer::new()));

        let err = workflow.generate("   ").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(completion.calls.load(Ordering::SeqCst), 0);
        assert!(!workflow.is_generating());
    }

    #[tokio::test]
    async fn test_generate_error_resets_flag() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path()).await.unwrap());
        let workflow = ContractWorkflow::new(
            storage,
            Arc::new(MockCompletion::new(true)),
            Arc::new(MockRenderer::new()),
        );

        let err = workflow.generate("draft an NDA").await.unwrap_err();
        assert!(matches!(err, AppError::Completion(_)));
        assert!(!workflow.is_generating());
    }

    #[tokio::test]
    async fn test_export_empty_text_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path()).await.unwrap());
        let renderer = Arc::new(MockRenderer::new());
        let workflow = ContractWorkflow::new(
            storage.clone(),
            Arc::new(MockCompletion::new(false)),
            renderer.clone(),
        );

        let owner = Uuid::new_v4();
        let err = workflow.export(owner, "  \n ", None).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        // Neither flag flip, nor render, nor storage write happened.
        assert!(!workflow.is_saving());
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
        assert!(storage.list(owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_export_with_supplied_name() {
        let (workflow, _dir) = workflow_with_dir().await;
        let owner = Uuid::new_v4();

        let exported = workflow
            .export(owner, "AGREEMENT BODY", Some("contract-A"))
            .await
            .unwrap();

        assert_eq!(exported.file_name, "contract-A.pdf");
        assert_eq!(exported.storage_key, format!("{}/contract-A.pdf", owner));

        let listing = workflow.list(owner).await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].name, "contract-A.pdf");
    }

    #[tokio::test]
    async fn test_export_default_name_is_timestamp_pdf() {
        let (workflow, _dir) = workflow_with_dir().await;
        let owner = Uuid::new_v4();

        let exported = workflow.export(owner, "AGREEMENT BODY", None).await.unwrap();

        let stem = exported.file_name.strip_suffix(".pdf").unwrap();
        assert!(!stem.is_empty());
        assert!(stem.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(
            exported.storage_key,
            format!("{}/{}", owner, exported.file_name)
        );
    }

    #[tokio::test]
    async fn test_export_storage_error_resets_saving_flag() {
        let workflow = ContractWorkflow::new(
            Arc::new(FailingStorage),
            Arc::new(MockCompletion::new(false)),
            Arc::new(MockRenderer::new()),
        );

        let err = workflow
            .export(Uuid::new_v4(), "AGREEMENT BODY", Some("contract-A"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert!(!workflow.is_saving());
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let (workflow, _dir) = workflow_with_dir().await;
        let owner = Uuid::new_v4();
        workflow
            .export(owner, "AGREEMENT", Some("contract-A"))
            .await
            .unwrap();

        let err = workflow
            .delete(owner, "contract-A.pdf", false)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(workflow.list(owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_refetches_listing() {
        let (workflow, _dir) = workflow_with_dir().await;
        let owner = Uuid::new_v4();
        workflow
            .export(owner, "AGREEMENT", Some("contract"))
            .await
            .unwrap();
        workflow
            .export(owner, "INVOICE TERMS", Some("Invoice"))
            .await
            .unwrap();

        let remaining = workflow.delete(owner, "contract.pdf", true).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Invoice.pdf");
    }

    #[tokio::test]
    async fn test_download_returns_bytes_and_mimetype() {
        let (workflow, _dir) = workflow_with_dir().await;
        let owner = Uuid::new_v4();
        workflow
            .export(owner, "AGREEMENT", Some("contract-A"))
            .await
            .unwrap();

        let (bytes, mimetype) = workflow.download(owner, "contract-A.pdf").await.unwrap();
        assert!(bytes.starts_with(b"%PDF-mock"));
        assert_eq!(mimetype, Some("application/pdf"));
    }

    #[test]
    fn test_filter_listing_is_case_insensitive_substring() {
        fn object(name: &str) -> StoredObject {
            StoredObject {
                name: name.to_string(),
                id: Uuid::new_v4(),
                created_at: Utc::now(),
                last_accessed_at: Utc::now(),
                metadata: pacta_core::models::ObjectMetadata {
                    size: 1,
                    mimetype: None,
                },
            }
        }

        let files = vec![object("Invoice.pdf"), object("contract.pdf")];
        let matched = filter_listing(&files, "CON");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "contract.pdf");

        // Empty term matches everything.
        assert_eq!(filter_listing(&files, "").len(), 2);
    }

    #[test]
    fn test_export_file_name_shapes() {
        assert_eq!(export_file_name(Some("contract-A")), "contract-A.pdf");
        let generated = export_file_name(None);
        let stem = generated.strip_suffix(".pdf").unwrap();
        assert!(stem.chars().all(|c| c.is_ascii_digit()));
        // Blank names fall back to the timestamp form.
        let blank = export_file_name(Some("  "));
        assert!(blank.ends_with(".pdf"));
        assert_ne!(blank, "  .pdf");
    }

    #[test]
    fn test_upload_file_name_keeps_original_suffix() {
        let name = upload_file_name("scan.pdf");
        assert!(name.ends_with("-scan.pdf"));
    }
}
