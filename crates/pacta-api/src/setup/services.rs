//! Collaborator construction from configuration.
//!
//! Every external service handle is built exactly once here and injected
//! through `AppState`; nothing constructs a client ad hoc later.

use crate::state::AppState;
use anyhow::{Context, Result};
use pacta_completion::HttpCompletionClient;
use pacta_core::Config;
use pacta_identity::HttpIdentityProvider;
use pacta_render::ContractRenderer;
use pacta_signing::{Authenticator, JwtGrant, RestSigningClient, SigningProvider};
use pacta_storage::create_storage;
use std::sync::Arc;
use std::time::Duration;

const IDENTITY_TIMEOUT_SECS: u64 = 10;

/// Build the application state from configuration.
pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;
    tracing::info!(backend = ?storage.backend_type(), "Storage backend ready");

    let identity = HttpIdentityProvider::new(
        config.identity_base_url(),
        config.identity_api_key().map(String::from),
        Duration::from_secs(IDENTITY_TIMEOUT_SECS),
    )
    .context("Failed to initialize identity provider client")?;

    let completion = HttpCompletionClient::new(
        config.completion_endpoint(),
        Duration::from_secs(config.completion_timeout_secs()),
    )
    .context("Failed to initialize completion client")?;

    let renderer = ContractRenderer::new(config.render_font_path(), config.render_scale())
        .context("Failed to initialize document renderer")?;

    let signing = setup_signing(config)?;
    if signing.is_none() {
        tracing::info!("E-signature integration not configured; signing routes disabled");
    }

    let state = AppState {
        is_production: config.is_production(),
        config: config.clone(),
        storage,
        identity: Arc::new(identity),
        completion: Arc::new(completion),
        renderer: Arc::new(renderer),
        signing,
    };

    Ok(Arc::new(state))
}

/// Build the signing client when the full configuration is present.
fn setup_signing(config: &Config) -> Result<Option<Arc<dyn SigningProvider>>> {
    let (base_path, account_id, integration_key, user_id, auth_server, key_path) = match (
        config.signing_base_path(),
        config.signing_account_id(),
        config.signing_integration_key(),
        config.signing_user_id(),
        config.signing_auth_server(),
        config.signing_private_key_path(),
    ) {
        (Some(a), Some(b), Some(c), Some(d), Some(e), Some(f)) => (a, b, c, d, e, f),
        _ => return Ok(None),
    };

    let private_key = std::fs::read(key_path)
        .with_context(|| format!("Failed to read signing private key at {}", key_path))?;

    let grant = JwtGrant::new(integration_key, user_id, auth_server, private_key);
    let client = RestSigningClient::new(base_path, account_id, Authenticator::Jwt(grant));

    tracing::info!(base_path = %base_path, "E-signature integration configured");

    Ok(Some(Arc::new(client)))
}
