use crate::auth::Identity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::ContractWorkflow;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response, StatusCode},
    response::IntoResponse,
};
use pacta_core::AppError;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v0/contracts/{name}/file",
    tag = "contracts",
    params(
        ("name" = String, Path, description = "File name within the owner's namespace")
    ),
    responses(
        (status = 200, description = "Document bytes", content_type = "application/octet-stream"),
        (status = 404, description = "Document not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, identity), fields(user_id = %identity.owner_id(), file_name = %name, operation = "download"))]
pub async fn download_contract(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let workflow = ContractWorkflow::from_state(&state);
    let (bytes, mimetype) = workflow.download(identity.owner_id(), &name).await?;

    let content_disposition = format!("attachment; filename=\"{}\"", name);

    // The response owns the bytes; no handle to the payload survives this
    // handler.
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(
            header::CONTENT_TYPE,
            mimetype.unwrap_or("application/octet-stream"),
        )
        .header(header::CONTENT_DISPOSITION, content_disposition.as_str())
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
