use crate::error::IdentityError;
use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

/// The resolved identity behind a bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Identity resolution capability.
///
/// Resolution must be performed per operation; callers may not cache a
/// previous answer across operations.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the user behind a token. `Ok(None)` means the token is
    /// missing, invalid, or expired.
    async fn get_user(&self, token: &str) -> Result<Option<User>, IdentityError>;

    /// Invalidate the session behind a token.
    async fn sign_out(&self, token: &str) -> Result<(), IdentityError>;
}
