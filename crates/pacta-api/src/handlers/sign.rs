use crate::auth::Identity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::ContractWorkflow;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use pacta_core::AppError;
use pacta_signing::{EnvelopeDefinition, RecipientViewRequest, SignerDescriptor};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignRequest {
    pub signer_email: String,
    pub signer_name: String,
    /// Where the provider sends the signer after completing the document.
    #[serde(default)]
    pub return_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignResponse {
    pub envelope_id: String,
    /// Embedded-signing URL to redirect the signer to.
    pub redirect_url: String,
}

#[utoipa::path(
    post,
    path = "/api/v0/contracts/{name}/sign",
    tag = "signing",
    params(
        ("name" = String, Path, description = "File name within the owner's namespace")
    ),
    request_body = SignRequest,
    responses(
        (status = 200, description = "Envelope submitted", body = SignResponse),
        (status = 400, description = "Signing not configured or invalid input", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
        (status = 502, description = "Signing provider failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request, identity), fields(user_id = %identity.owner_id(), file_name = %name, operation = "sign"))]
pub async fn sign_contract(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Path(name): Path<String>,
    Json(request): Json<SignRequest>,
) -> Result<Json<SignResponse>, HttpAppError> {
    let signing = state.signing.clone().ok_or_else(|| {
        AppError::BadRequest("E-signature integration is not configured".to_string())
    })?;

    if request.signer_email.trim().is_empty() || request.signer_name.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Signer email and name are required".to_string(),
        )
        .into());
    }

    // Fetch the stored document, then hand it to the provider.
    let workflow = ContractWorkflow::from_state(&state);
    let (document, _) = workflow.download(identity.owner_id(), &name).await?;

    let signer = SignerDescriptor {
        email: request.signer_email,
        name: request.signer_name,
        // The embedded-signing recipient is pinned to the caller.
        client_user_id: identity.owner_id().to_string(),
    };
    let return_url = request
        .return_url
        .or_else(|| state.config.signing_return_url().map(String::from))
        .ok_or_else(|| AppError::InvalidInput("A return URL is required".to_string()))?;

    let envelope = EnvelopeDefinition::for_single_document(&document, &name, &signer);
    let view = RecipientViewRequest::for_signer(&signer, &return_url);

    let result = signing.send_for_embedded_signing(&envelope, &view).await?;

    Ok(Json(SignResponse {
        envelope_id: result.envelope_id,
        redirect_url: result.redirect_url,
    }))
}
