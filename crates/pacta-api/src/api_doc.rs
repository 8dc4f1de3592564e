//! OpenAPI documentation.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health,
        crate::handlers::auth_pages::sign_in,
        crate::handlers::auth_pages::sign_out,
        crate::handlers::generate::generate_contract,
        crate::handlers::contract_export::export_contract,
        crate::handlers::contract_upload::upload_contract,
        crate::handlers::contract_list::list_contracts,
        crate::handlers::contract_download::download_contract,
        crate::handlers::contract_delete::delete_contract,
        crate::handlers::sign::sign_contract,
    ),
    components(schemas(
        crate::error::ErrorResponse,
        crate::handlers::health::HealthResponse,
        crate::handlers::auth_pages::SignInEntry,
        crate::handlers::generate::GenerateRequest,
        crate::handlers::generate::GenerateResponse,
        crate::handlers::contract_export::ExportRequest,
        crate::handlers::contract_export::ExportResponse,
        crate::handlers::contract_upload::UploadResponse,
        crate::handlers::contract_list::ContractEntry,
        crate::handlers::contract_list::ContractListResponse,
        crate::handlers::sign::SignRequest,
        crate::handlers::sign::SignResponse,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Sign-in entry point and sign-out"),
        (name = "contracts", description = "Contract generation, export, and storage"),
        (name = "signing", description = "E-signature hand-off"),
    ),
    info(
        title = "Pacta API",
        description = "Contract generation and storage service",
    )
)]
pub struct ApiDoc;
