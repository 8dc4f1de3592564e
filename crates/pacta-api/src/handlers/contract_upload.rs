use crate::auth::Identity;
use crate::constants::UPLOAD_FIELD;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::ContractWorkflow;
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    Json,
};
use pacta_core::models::format_file_size;
use pacta_core::AppError;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub path: String,
    pub file_name: String,
    pub size_bytes: usize,
    pub size: String,
}

#[utoipa::path(
    post,
    path = "/api/v0/contracts",
    tag = "contracts",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Contract uploaded", body = UploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn upload_contract(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let mut uploaded: Option<(String, Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::InvalidInput("File name is required".to_string()))?;
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read upload: {}", e)))?;

        uploaded = Some((file_name, content_type, data.to_vec()));
        break;
    }

    let (file_name, content_type, data) = uploaded
        .ok_or_else(|| AppError::InvalidInput("Please select a file to upload".to_string()))?;

    let workflow = ContractWorkflow::from_state(&state);
    let persisted = workflow
        .upload(
            &state.config,
            identity.owner_id(),
            &file_name,
            content_type.as_deref(),
            data,
        )
        .await?;

    Ok(Json(UploadResponse {
        path: persisted.storage_key,
        size: format_file_size(persisted.size_bytes as u64),
        file_name: persisted.file_name,
        size_bytes: persisted.size_bytes,
    }))
}
