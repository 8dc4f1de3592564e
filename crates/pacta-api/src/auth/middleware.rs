use crate::auth::models::Identity;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

/// Extract the bearer token from the Authorization header.
fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Per-request identity gate for protected routes.
///
/// Resolves the caller's token against the identity provider on every
/// request (no cross-operation caching). Absence of an identity — missing
/// token, rejected token, or a provider lookup failure — redirects to the
/// sign-in entry point before any handler (and therefore any storage
/// operation) runs.
pub async fn identity_gate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let sign_in = state.config.sign_in_path().to_string();

    let token = match bearer_token(&request) {
        Some(token) => token.to_string(),
        None => {
            tracing::debug!("No bearer token; redirecting to sign-in");
            return Redirect::to(&sign_in).into_response();
        }
    };

    match state.identity.get_user(&token).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(Identity { user, token });
            next.run(request).await
        }
        Ok(None) => {
            tracing::debug!("Identity provider rejected token; redirecting to sign-in");
            Redirect::to(&sign_in).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Identity lookup failed; redirecting to sign-in");
            Redirect::to(&sign_in).into_response()
        }
    }
}
