//! Shared models
//!
//! Listing metadata mirrors what the object store reports per object; the
//! service holds no authoritative copy of any of these fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Per-object metadata reported by the store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ObjectMetadata {
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
}

/// One entry in an owner's listing.
///
/// `name` is the file name within the owner's prefix (not the full storage
/// key); `id` is stable across listings for the same key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoredObject {
    pub name: String,
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    pub metadata: ObjectMetadata,
}

/// Human-readable file size with 1024-based units, two decimals, trailing
/// zeros trimmed ("1.5 KB", "12 MB", "0 Bytes").
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);

    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');

    format!("{} {}", trimmed, UNITS[exponent])
}

/// Best-effort MIME type from a file name extension.
pub fn mimetype_for_name(name: &str) -> Option<&'static str> {
    let extension = name.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}
