/// Version prefix for all API routes.
pub const API_PREFIX: &str = "/api/v0";

/// Form field carrying the file in a multipart upload.
pub const UPLOAD_FIELD: &str = "file";
