use crate::auth::Identity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::ContractWorkflow;
use crate::state::AppState;
use axum::{extract::State, Json};
use pacta_core::models::format_file_size;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExportRequest {
    /// The (possibly user-edited) contract text to render.
    pub text: String,
    /// Optional file name; a timestamp-based name is generated when absent.
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExportResponse {
    pub path: String,
    pub file_name: String,
    pub size_bytes: usize,
    pub size: String,
}

#[utoipa::path(
    post,
    path = "/api/v0/contracts/export",
    tag = "contracts",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "Contract rendered and persisted", body = ExportResponse),
        (status = 400, description = "Empty document text", body = ErrorResponse),
        (status = 500, description = "Render or storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request, identity), fields(user_id = %identity.owner_id(), operation = "export"))]
pub async fn export_contract(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Json(request): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, HttpAppError> {
    let workflow = ContractWorkflow::from_state(&state);
    let persisted = workflow
        .export(
            identity.owner_id(),
            &request.text,
            request.file_name.as_deref(),
        )
        .await?;

    Ok(Json(ExportResponse {
        path: persisted.storage_key,
        size: format_file_size(persisted.size_bytes as u64),
        file_name: persisted.file_name,
        size_bytes: persisted.size_bytes,
    }))
}
