use crate::auth::Identity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct SignInEntry {
    pub message: &'static str,
    /// Where callers obtain a session token.
    pub identity_provider: String,
}

/// The sign-in entry point every unauthenticated protected request is
/// redirected to.
#[utoipa::path(
    get,
    path = "/sign-in",
    tag = "auth",
    responses(
        (status = 200, description = "Sign-in entry point", body = SignInEntry)
    )
)]
pub async fn sign_in(State(state): State<Arc<AppState>>) -> Json<SignInEntry> {
    Json(SignInEntry {
        message: "Authenticate against the identity provider and retry with a bearer token",
        identity_provider: state.config.identity_base_url().to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/api/v0/auth/sign-out",
    tag = "auth",
    responses(
        (status = 204, description = "Session invalidated"),
        (status = 502, description = "Identity provider failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, identity), fields(user_id = %identity.owner_id(), operation = "sign_out"))]
pub async fn sign_out(
    State(state): State<Arc<AppState>>,
    identity: Identity,
) -> Result<axum::http::StatusCode, HttpAppError> {
    state.identity.sign_out(&identity.token).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
