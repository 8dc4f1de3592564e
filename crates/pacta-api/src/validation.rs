//! Upload validation.
//!
//! Runs before any storage call: a payload that fails validation must leave
//! no trace in the store.

use pacta_core::{AppError, Config};

/// Validate an uploaded file against configured limits and allowlists.
pub fn validate_upload(
    config: &Config,
    file_name: &str,
    content_type: Option<&str>,
    size_bytes: usize,
) -> Result<(), AppError> {
    if size_bytes == 0 {
        return Err(AppError::InvalidInput("File is empty".to_string()));
    }

    if size_bytes > config.max_upload_size_bytes() {
        return Err(AppError::PayloadTooLarge(format!(
            "{} bytes exceeds max {} bytes",
            size_bytes,
            config.max_upload_size_bytes()
        )));
    }

    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .ok_or_else(|| {
            AppError::InvalidInput(format!("Missing file extension (filename: {})", file_name))
        })?;

    if !config
        .allowed_extensions()
        .iter()
        .any(|allowed| allowed == &extension)
    {
        return Err(AppError::InvalidInput(format!(
            "Invalid extension '{}', allowed: {:?}",
            extension,
            config.allowed_extensions()
        )));
    }

    if let Some(content_type) = content_type {
        let content_type = content_type.to_ascii_lowercase();
        if !config
            .allowed_content_types()
            .iter()
            .any(|allowed| allowed == &content_type)
        {
            return Err(AppError::InvalidInput(format!(
                "Invalid content type '{}', allowed: {:?}",
                content_type,
                config.allowed_content_types()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacta_core::config::{BaseConfig, ServiceConfig};

    fn test_config() -> Config {
        Config(Box::new(ServiceConfig {
            base: BaseConfig {
                server_port: 4000,
                cors_origins: vec!["*".to_string()],
                environment: "development".to_string(),
            },
            storage_backend: None,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            aws_region: None,
            local_storage_path: None,
            identity_base_url: "http://localhost:9999".to_string(),
            identity_api_key: None,
            sign_in_path: "/sign-in".to_string(),
            completion_endpoint: "http://localhost:5000/chat".to_string(),
            completion_timeout_secs: 120,
            render_font_path: String::new(),
            render_scale: 2,
            max_upload_size_bytes: 1024,
            allowed_extensions: vec!["pdf".to_string(), "png".to_string()],
            allowed_content_types: vec![
                "application/pdf".to_string(),
                "image/png".to_string(),
            ],
            signing_base_path: None,
            signing_account_id: None,
            signing_integration_key: None,
            signing_user_id: None,
            signing_auth_server: None,
            signing_private_key_path: None,
            signing_return_url: None,
        }))
    }

    #[test]
    fn test_accepts_allowed_pdf() {
        let config = test_config();
        assert!(validate_upload(&config, "contract.pdf", Some("application/pdf"), 512).is_ok());
    }

    #[test]
    fn test_rejects_empty_file() {
        let config = test_config();
        assert!(matches!(
            validate_upload(&config, "contract.pdf", None, 0),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_file() {
        let config = test_config();
        assert!(matches!(
            validate_upload(&config, "contract.pdf", None, 2048),
            Err(AppError::PayloadTooLarge(_))
        ));
    }

    #[test]
    fn test_rejects_disallowed_extension() {
        let config = test_config();
        assert!(matches!(
            validate_upload(&config, "malware.exe", None, 512),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_missing_extension() {
        let config = test_config();
        assert!(matches!(
            validate_upload(&config, "noextension", None, 512),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_disallowed_content_type() {
        let config = test_config();
        assert!(matches!(
            validate_upload(&config, "contract.pdf", Some("text/html"), 512),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        let config = test_config();
        assert!(validate_upload(&config, "SCAN.PDF", Some("application/pdf"), 512).is_ok());
    }
}
