use crate::error::SigningError;
use crate::jwt::JwtGrant;
use crate::types::{EnvelopeDefinition, RecipientViewRequest};
use crate::SigningProvider;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeSummary {
    envelope_id: String,
}

#[derive(Debug, Deserialize)]
struct RecipientViewResponse {
    url: String,
}

/// How the REST client authorizes its calls.
///
/// Tokens are resolved per operation; nothing is cached across calls, so an
/// expired grant never outlives a request.
#[derive(Clone)]
pub enum Authenticator {
    /// A pre-acquired bearer token.
    Static(String),
    /// Exchange a JWT grant for a token on every operation.
    Jwt(JwtGrant),
}

/// REST client for the e-signature provider.
///
/// `base_path` is the provider's REST root (e.g.
/// "https://demo.docusign.net/restapi"); envelope routes live under
/// `/v2.1/accounts/{account_id}`.
#[derive(Clone)]
pub struct RestSigningClient {
    http: reqwest::Client,
    base_path: String,
    account_id: String,
    authenticator: Authenticator,
}

impl RestSigningClient {
    pub fn new(
        base_path: impl Into<String>,
        account_id: impl Into<String>,
        authenticator: Authenticator,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_path: base_path.into().trim_end_matches('/').to_string(),
            account_id: account_id.into(),
            authenticator,
        }
    }

    async fn access_token(&self) -> Result<String, SigningError> {
        match &self.authenticator {
            Authenticator::Static(token) => Ok(token.clone()),
            Authenticator::Jwt(grant) => grant.exchange(&self.http).await,
        }
    }

    async fn post_json<B: serde::Serialize, R: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, SigningError> {
        let token = self.access_token().await?;
        let url = format!(
            "{}/v2.1/accounts/{}{}",
            self.base_path, self.account_id, path
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SigningError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| SigningError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl SigningProvider for RestSigningClient {
    async fn create_envelope(&self, envelope: &EnvelopeDefinition) -> Result<String, SigningError> {
        let summary: EnvelopeSummary = self.post_json("/envelopes", envelope).await?;

        tracing::info!(envelope_id = %summary.envelope_id, "Envelope created");

        Ok(summary.envelope_id)
    }

    async fn create_recipient_view(
        &self,
        envelope_id: &str,
        request: &RecipientViewRequest,
    ) -> Result<String, SigningError> {
        let path = format!("/envelopes/{}/views/recipient", envelope_id);
        let view: RecipientViewResponse = self.post_json(&path, request).await?;

        tracing::info!(envelope_id = %envelope_id, "Recipient view created");

        Ok(view.url)
    }
}
