//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Json, Router,
};
use pacta_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    // Public routes (no identity required)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/sign-in", get(handlers::auth_pages::sign_in))
        .route(
            "/api/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .with_state(state.clone());

    // Protected routes: every request passes the identity gate
    let protected_routes = protected_routes(state.clone()).layer(
        axum::middleware::from_fn_with_state(state.clone(), crate::auth::identity_gate),
    );

    // Server-level concurrency limit to protect against resource exhaustion under extreme load
    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);

    let app = public_routes
        .merge(protected_routes)
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        // Leave room for multipart framing around the payload itself.
        .layer(DefaultBodyLimit::max(config.max_upload_size_bytes() + 64 * 1024))
        .layer(RequestBodyLimitLayer::new(
            config.max_upload_size_bytes() + 64 * 1024,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn protected_routes(state: Arc<AppState>) -> Router<()> {
    Router::new()
        .route(
            &format!("{}/contracts/generate", API_PREFIX),
            post(handlers::generate::generate_contract),
        )
        .route(
            &format!("{}/contracts/export", API_PREFIX),
            post(handlers::contract_export::export_contract),
        )
        .route(
            &format!("{}/contracts", API_PREFIX),
            post(handlers::contract_upload::upload_contract)
                .get(handlers::contract_list::list_contracts),
        )
        .route(
            &format!("{}/contracts/{{name}}/file", API_PREFIX),
            get(handlers::contract_download::download_contract),
        )
        .route(
            &format!("{}/contracts/{{name}}", API_PREFIX),
            delete(handlers::contract_delete::delete_contract),
        )
        .route(
            &format!("{}/contracts/{{name}}/sign", API_PREFIX),
            post(handlers::sign::sign_contract),
        )
        .route(
            &format!("{}/auth/sign-out", API_PREFIX),
            post(handlers::auth_pages::sign_out),
        )
        .with_state(state)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let origins = config.cors_origins();

    let cors = if origins.iter().any(|origin| origin == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let parsed: Result<Vec<HeaderValue>, _> = origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect();
        let parsed = parsed.map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    };

    Ok(cors)
}
