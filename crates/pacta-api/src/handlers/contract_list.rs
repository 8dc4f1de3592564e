use crate::auth::Identity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::contracts::filter_listing;
use crate::services::ContractWorkflow;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use pacta_core::models::{format_file_size, StoredObject};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring filter over file names, applied to the
    /// fetched listing.
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContractEntry {
    pub name: String,
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    pub size_bytes: u64,
    /// Human-readable size ("1.5 KB").
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
}

impl From<StoredObject> for ContractEntry {
    fn from(object: StoredObject) -> Self {
        ContractEntry {
            name: object.name,
            id: object.id,
            created_at: object.created_at,
            last_accessed_at: object.last_accessed_at,
            size_bytes: object.metadata.size,
            size: format_file_size(object.metadata.size),
            mimetype: object.metadata.mimetype,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContractListResponse {
    pub files: Vec<ContractEntry>,
}

pub fn listing_response(objects: Vec<StoredObject>) -> ContractListResponse {
    ContractListResponse {
        files: objects.into_iter().map(ContractEntry::from).collect(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v0/contracts",
    tag = "contracts",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring filter over file names")
    ),
    responses(
        (status = 200, description = "Owner's documents", body = ContractListResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, identity), fields(user_id = %identity.owner_id(), operation = "list"))]
pub async fn list_contracts(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Query(query): Query<ListQuery>,
) -> Result<Json<ContractListResponse>, HttpAppError> {
    let workflow = ContractWorkflow::from_state(&state);
    let objects = workflow.list(identity.owner_id()).await?;

    let objects = match query.search.as_deref() {
        Some(term) if !term.is_empty() => filter_listing(&objects, term),
        _ => objects,
    };

    Ok(Json(listing_response(objects)))
}
