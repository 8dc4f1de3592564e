use crate::error::ErrorResponse;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use pacta_identity::User;
use uuid::Uuid;

/// The caller's identity, resolved by the gate middleware and stored in
/// request extensions together with the bearer token it came from.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user: User,
    pub token: String,
}

impl Identity {
    /// The owner id scoping all of this caller's storage keys.
    pub fn owner_id(&self) -> Uuid {
        self.user.id
    }
}

// Extract directly from request parts so handlers taking Multipart can still
// receive the identity.
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Identity>().cloned().ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Missing identity".to_string(),
                    details: None,
                    error_type: None,
                    code: "MISSING_IDENTITY".to_string(),
                    recoverable: false,
                    suggested_action: Some("Sign in and retry".to_string()),
                }),
            )
        })
    }
}
