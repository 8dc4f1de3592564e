use crate::auth::Identity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::contract_list::{listing_response, ContractListResponse};
use crate::services::ContractWorkflow;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    /// Explicit confirmation; without `confirm=true` nothing is removed.
    #[serde(default)]
    pub confirm: bool,
}

#[utoipa::path(
    delete,
    path = "/api/v0/contracts/{name}",
    tag = "contracts",
    params(
        ("name" = String, Path, description = "File name within the owner's namespace"),
        ("confirm" = bool, Query, description = "Must be true; deletion requires explicit confirmation")
    ),
    responses(
        (status = 200, description = "Deleted; body is the store's fresh listing", body = ContractListResponse),
        (status = 400, description = "Missing confirmation", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, identity), fields(user_id = %identity.owner_id(), file_name = %name, operation = "delete"))]
pub async fn delete_contract(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Path(name): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<ContractListResponse>, HttpAppError> {
    let workflow = ContractWorkflow::from_state(&state);
    let listing = workflow
        .delete(identity.owner_id(), &name, query.confirm)
        .await?;

    Ok(Json(listing_response(listing)))
}
