//! Application state.
//!
//! Every external collaborator is an explicitly injected trait object with
//! its lifetime owned here; handlers never construct clients ad hoc, so
//! there is no hidden shared client state anywhere in the tree.

use pacta_completion::CompletionProvider;
use pacta_core::Config;
use pacta_identity::IdentityProvider;
use pacta_render::DocumentRenderer;
use pacta_signing::SigningProvider;
use pacta_storage::Storage;
use std::sync::Arc;

/// Main application state: injected collaborators plus configuration.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub identity: Arc<dyn IdentityProvider>,
    pub completion: Arc<dyn CompletionProvider>,
    pub renderer: Arc<dyn DocumentRenderer>,
    /// Absent when the e-signature integration is not configured.
    pub signing: Option<Arc<dyn SigningProvider>>,
    pub is_production: bool,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
