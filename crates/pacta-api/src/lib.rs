//! Pacta API library
//!
//! HTTP surface for the contract service. `main.rs` is a thin binary; all
//! setup lives here so integration tests can assemble the router against
//! mock collaborators.

pub mod api_doc;
pub mod auth;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod validation;
