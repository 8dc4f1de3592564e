//! Pacta Storage Library
//!
//! This crate provides the object-store abstraction and implementations for
//! Pacta. It includes the Storage trait and backends for S3-compatible
//! stores and the local filesystem.
//!
//! # Storage key format
//!
//! Storage keys are owner-scoped: `{owner_id}/{file_name}`. A user's
//! objects are exactly the objects under their id prefix; there is no
//! other ownership record.
//!
//! Keys must not contain `..` or a leading `/`. Key generation is
//! centralized in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::object_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use pacta_core::config::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
