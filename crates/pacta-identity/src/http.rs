use crate::error::IdentityError;
use crate::provider::{IdentityProvider, User};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

const USER_PATH: &str = "/auth/v1/user";
const LOGOUT_PATH: &str = "/auth/v1/logout";

/// HTTP identity provider backend.
///
/// Talks to a GoTrue-style auth service: `GET /auth/v1/user` resolves the
/// token, `POST /auth/v1/logout` revokes it. The optional service api key
/// is sent alongside the caller's bearer token.
#[derive(Clone)]
pub struct HttpIdentityProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpIdentityProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, IdentityError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IdentityError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn request(&self, method: reqwest::Method, path: &str, token: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(token);
        if let Some(ref api_key) = self.api_key {
            builder = builder.header("apikey", api_key);
        }
        builder
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn get_user(&self, token: &str) -> Result<Option<User>, IdentityError> {
        if token.is_empty() {
            return Ok(None);
        }

        let response = self
            .request(reqwest::Method::GET, USER_PATH, token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let user: User = response
                    .json()
                    .await
                    .map_err(|e| IdentityError::InvalidResponse(e.to_string()))?;
                Ok(Some(user))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::debug!("Identity provider rejected token");
                Ok(None)
            }
            status => {
                let message = response.text().await.unwrap_or_default();
                Err(IdentityError::Provider {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    async fn sign_out(&self, token: &str) -> Result<(), IdentityError> {
        let response = self
            .request(reqwest::Method::POST, LOGOUT_PATH, token)
            .send()
            .await?;

        let status = response.status();
        // An already-invalid token is a successful sign-out.
        if status.is_success()
            || status == StatusCode::UNAUTHORIZED
            || status == StatusCode::FORBIDDEN
        {
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        Err(IdentityError::Provider {
            status: status.as_u16(),
            message,
        })
    }
}
