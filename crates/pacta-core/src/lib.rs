//! Pacta core library
//!
//! Shared building blocks for the Pacta contract service: the unified
//! `AppError` taxonomy, environment-based configuration, and the models
//! exchanged between the API surface and the storage/identity crates.

pub mod config;
pub mod error;
pub mod models;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
