use crate::auth::Identity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::ContractWorkflow;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// Free-text description of the desired contract.
    pub prompt: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateResponse {
    /// The assembled, sanitized contract text.
    pub contract: String,
}

#[utoipa::path(
    post,
    path = "/api/v0/contracts/generate",
    tag = "contracts",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Contract text generated", body = GenerateResponse),
        (status = 400, description = "Empty prompt", body = ErrorResponse),
        (status = 502, description = "Completion endpoint failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request, identity), fields(user_id = %identity.owner_id(), operation = "generate"))]
pub async fn generate_contract(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, HttpAppError> {
    let workflow = ContractWorkflow::from_state(&state);
    let contract = workflow.generate(&request.prompt).await?;

    Ok(Json(GenerateResponse { contract }))
}
