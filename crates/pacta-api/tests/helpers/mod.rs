//! Shared test fixtures: an app assembled from mock collaborators and a
//! real local-filesystem storage backend in a temp directory.

use async_trait::async_trait;
use axum_test::TestServer;
use pacta_api::setup::routes::setup_routes;
use pacta_api::state::AppState;
use pacta_completion::{CompletionError, CompletionProvider};
use pacta_core::config::{BaseConfig, ServiceConfig};
use pacta_core::Config;
use pacta_identity::{IdentityError, IdentityProvider, User};
use pacta_render::{DocumentRenderer, RenderError};
use pacta_signing::{EnvelopeDefinition, RecipientViewRequest, SigningError, SigningProvider};
use pacta_storage::LocalStorage;
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

pub const GOOD_TOKEN: &str = "good-token";

pub fn test_config() -> Config {
    Config(Box::new(ServiceConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
        },
        storage_backend: None,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        aws_region: None,
        local_storage_path: None,
        identity_base_url: "http://identity.test".to_string(),
        identity_api_key: None,
        sign_in_path: "/sign-in".to_string(),
        completion_endpoint: "http://completion.test/chat".to_string(),
        completion_timeout_secs: 5,
        render_font_path: String::new(),
        render_scale: 2,
        max_upload_size_bytes: 1024 * 1024,
        allowed_extensions: vec!["pdf".to_string(), "png".to_string()],
        allowed_content_types: vec![
            "application/pdf".to_string(),
            "image/png".to_string(),
            "application/octet-stream".to_string(),
        ],
        signing_base_path: None,
        signing_account_id: None,
        signing_integration_key: None,
        signing_user_id: None,
        signing_auth_server: None,
        signing_private_key_path: None,
        signing_return_url: Some("https://app.test/done".to_string()),
    }))
}

pub struct MockIdentity {
    pub user_id: Uuid,
}

#[async_trait]
impl IdentityProvider for MockIdentity {
    async fn get_user(&self, token: &str) -> Result<Option<User>, IdentityError> {
        if token == GOOD_TOKEN {
            Ok(Some(User {
                id: self.user_id,
                email: Some("owner@example.com".to_string()),
            }))
        } else {
            Ok(None)
        }
    }

    async fn sign_out(&self, _token: &str) -> Result<(), IdentityError> {
        Ok(())
    }
}

pub struct MockCompletion;

#[async_trait]
impl CompletionProvider for MockCompletion {
    async fn complete_text(&self, prompt: &str) -> Result<String, CompletionError> {
        if prompt.trim().is_empty() {
            return Err(CompletionError::EmptyPrompt);
        }
        Ok("SERVICE AGREEMENT\nClause 1. Scope.".to_string())
    }
}

pub struct MockRenderer;

impl DocumentRenderer for MockRenderer {
    fn render_pdf(&self, text: &str, _title: &str) -> Result<Vec<u8>, RenderError> {
        if text.trim().is_empty() {
            return Err(RenderError::EmptyDocument);
        }
        Ok(format!("%PDF-mock len={}", text.len()).into_bytes())
    }
}

pub struct MockSigning;

#[async_trait]
impl SigningProvider for MockSigning {
    async fn create_envelope(&self, envelope: &EnvelopeDefinition) -> Result<String, SigningError> {
        assert_eq!(envelope.status, "sent");
        Ok("env-42".to_string())
    }

    async fn create_recipient_view(
        &self,
        envelope_id: &str,
        _request: &RecipientViewRequest,
    ) -> Result<String, SigningError> {
        Ok(format!("https://sign.test/embedded/{}", envelope_id))
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub owner_id: Uuid,
    pub storage_dir: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let storage_dir = tempfile::tempdir().expect("tempdir");
    let storage = Arc::new(
        LocalStorage::new(storage_dir.path())
            .await
            .expect("local storage"),
    );

    let owner_id = Uuid::new_v4();
    let config = test_config();

    let state = Arc::new(AppState {
        config: config.clone(),
        storage,
        identity: Arc::new(MockIdentity { user_id: owner_id }),
        completion: Arc::new(MockCompletion),
        renderer: Arc::new(MockRenderer),
        signing: Some(Arc::new(MockSigning)),
        is_production: false,
    });

    let router = setup_routes(&config, state).expect("router");
    let server = TestServer::new(router).expect("test server");

    TestApp {
        server,
        owner_id,
        storage_dir,
    }
}

/// Count files stored under the owner's prefix on disk.
pub fn stored_file_count(app: &TestApp) -> usize {
    let dir = app.storage_dir.path().join(app.owner_id.to_string());
    match std::fs::read_dir(dir) {
        Ok(entries) => entries.count(),
        Err(_) => 0,
    }
}
