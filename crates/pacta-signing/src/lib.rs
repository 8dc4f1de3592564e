//! E-signature provider client
//!
//! Narrow capability interface over an envelope-based e-signature service:
//! construct an envelope (document + signer), submit it, and obtain an
//! embedded-signing redirect URL for the recipient. Authorization uses the
//! provider's JWT grant: an RS256 assertion exchanged for a bearer token.
//!
//! The provider is a black box behind [`SigningProvider`]; nothing in the
//! contract workflow depends on the concrete vendor.

mod error;
mod jwt;
mod rest;
mod types;

pub use error::SigningError;
pub use jwt::JwtGrant;
pub use rest::{Authenticator, RestSigningClient};
pub use types::{
    EmbeddedSigning, EnvelopeDefinition, EnvelopeDocument, RecipientViewRequest, Recipients,
    SignHereTab, Signer, SignerDescriptor, Tabs,
};

use async_trait::async_trait;

/// Envelope-based signing capability.
#[async_trait]
pub trait SigningProvider: Send + Sync {
    /// Submit an envelope; returns the provider's envelope id.
    async fn create_envelope(&self, envelope: &EnvelopeDefinition) -> Result<String, SigningError>;

    /// Obtain the embedded-signing URL for a recipient of an envelope.
    async fn create_recipient_view(
        &self,
        envelope_id: &str,
        request: &RecipientViewRequest,
    ) -> Result<String, SigningError>;

    /// Envelope submission and recipient view in one step.
    async fn send_for_embedded_signing(
        &self,
        envelope: &EnvelopeDefinition,
        view: &RecipientViewRequest,
    ) -> Result<EmbeddedSigning, SigningError> {
        let envelope_id = self.create_envelope(envelope).await?;
        let redirect_url = self.create_recipient_view(&envelope_id, view).await?;
        Ok(EmbeddedSigning {
            envelope_id,
            redirect_url,
        })
    }
}
