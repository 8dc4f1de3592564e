//! Configuration module
//!
//! This module provides configuration structures for the API and services,
//! including storage, identity, completion, rendering, and signing settings.
//! Everything is read from the environment (with `.env` support) so the
//! binary can run unchanged across development and deployment.

use std::env;

// Common constants
const DEFAULT_PORT: u16 = 4000;
const MAX_UPLOAD_SIZE_MB: usize = 50;
const COMPLETION_TIMEOUT_SECS: u64 = 120;
const RENDER_SCALE: u32 = 2;
const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Local,
}

/// Base configuration shared by the HTTP surface
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

/// Full service configuration
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub base: BaseConfig,

    // Storage configuration
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, Supabase Storage, etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,

    // Identity provider configuration
    pub identity_base_url: String,
    pub identity_api_key: Option<String>,
    pub sign_in_path: String,

    // Completion endpoint configuration
    pub completion_endpoint: String,
    pub completion_timeout_secs: u64,

    // Rendering configuration
    pub render_font_path: String,
    pub render_scale: u32,

    // Upload limits
    pub max_upload_size_bytes: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,

    // E-signature configuration (optional; signing routes fail with a
    // configuration error when unset)
    pub signing_base_path: Option<String>,
    pub signing_account_id: Option<String>,
    pub signing_integration_key: Option<String>,
    pub signing_user_id: Option<String>,
    pub signing_auth_server: Option<String>,
    pub signing_private_key_path: Option<String>,
    pub signing_return_url: Option<String>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ServiceConfig>);

impl Config {
    fn inner(&self) -> &ServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.inner().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.inner().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.inner().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.inner().aws_region.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.inner().local_storage_path.as_deref()
    }

    pub fn identity_base_url(&self) -> &str {
        &self.inner().identity_base_url
    }

    pub fn identity_api_key(&self) -> Option<&str> {
        self.inner().identity_api_key.as_deref()
    }

    pub fn sign_in_path(&self) -> &str {
        &self.inner().sign_in_path
    }

    pub fn completion_endpoint(&self) -> &str {
        &self.inner().completion_endpoint
    }

    pub fn completion_timeout_secs(&self) -> u64 {
        self.inner().completion_timeout_secs
    }

    pub fn render_font_path(&self) -> &str {
        &self.inner().render_font_path
    }

    pub fn render_scale(&self) -> u32 {
        self.inner().render_scale
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.inner().max_upload_size_bytes
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.inner().allowed_extensions
    }

    pub fn allowed_content_types(&self) -> &[String] {
        &self.inner().allowed_content_types
    }

    pub fn signing_base_path(&self) -> Option<&str> {
        self.inner().signing_base_path.as_deref()
    }

    pub fn signing_account_id(&self) -> Option<&str> {
        self.inner().signing_account_id.as_deref()
    }

    pub fn signing_integration_key(&self) -> Option<&str> {
        self.inner().signing_integration_key.as_deref()
    }

    pub fn signing_user_id(&self) -> Option<&str> {
        self.inner().signing_user_id.as_deref()
    }

    pub fn signing_auth_server(&self) -> Option<&str> {
        self.inner().signing_auth_server.as_deref()
    }

    pub fn signing_private_key_path(&self) -> Option<&str> {
        self.inner().signing_private_key_path.as_deref()
    }

    pub fn signing_return_url(&self) -> Option<&str> {
        self.inner().signing_return_url.as_deref()
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let allowed_extensions = env::var("ALLOWED_EXTENSIONS")
            .unwrap_or_else(|_| "pdf,jpg,jpeg,png,gif,webp".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        let allowed_content_types = env::var("ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| {
                "application/pdf,image/jpeg,image/png,image/gif,image/webp".to_string()
            })
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
        };

        // Storage backend configuration
        let storage_backend =
            env::var("STORAGE_BACKEND")
                .ok()
                .and_then(|s| match s.to_lowercase().as_str() {
                    "s3" => Some(StorageBackend::S3),
                    "local" => Some(StorageBackend::Local),
                    _ => None,
                });

        let config = ServiceConfig {
            base,
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            aws_region: env::var("AWS_REGION").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            identity_base_url: env::var("IDENTITY_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:9999".to_string()),
            identity_api_key: env::var("IDENTITY_API_KEY").ok(),
            sign_in_path: env::var("SIGN_IN_PATH").unwrap_or_else(|_| "/sign-in".to_string()),
            completion_endpoint: env::var("COMPLETION_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:5000/chat".to_string()),
            completion_timeout_secs: env::var("COMPLETION_TIMEOUT_SECS")
                .unwrap_or_else(|_| COMPLETION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(COMPLETION_TIMEOUT_SECS),
            render_font_path: env::var("RENDER_FONT_PATH")
                .unwrap_or_else(|_| DEFAULT_FONT_PATH.to_string()),
            render_scale: env::var("RENDER_SCALE")
                .unwrap_or_else(|_| RENDER_SCALE.to_string())
                .parse()
                .unwrap_or(RENDER_SCALE),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            allowed_extensions,
            allowed_content_types,
            signing_base_path: env::var("SIGNING_BASE_PATH").ok(),
            signing_account_id: env::var("SIGNING_ACCOUNT_ID").ok(),
            signing_integration_key: env::var("SIGNING_INTEGRATION_KEY").ok(),
            signing_user_id: env::var("SIGNING_USER_ID").ok(),
            signing_auth_server: env::var("SIGNING_AUTH_SERVER").ok(),
            signing_private_key_path: env::var("SIGNING_PRIVATE_KEY_PATH").ok(),
            signing_return_url: env::var("SIGNING_RETURN_URL").ok(),
        };

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> BaseConfig {
        BaseConfig {
            server_port: 4000,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
        }
    }

    fn service_config() -> ServiceConfig {
        ServiceConfig {
            base: base_config(),
            storage_backend: Some(StorageBackend::Local),
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            aws_region: None,
            local_storage_path: Some("/tmp/pacta".to_string()),
            identity_base_url: "http://localhost:9999".to_string(),
            identity_api_key: None,
            sign_in_path: "/sign-in".to_string(),
            completion_endpoint: "http://localhost:5000/chat".to_string(),
            completion_timeout_secs: 120,
            render_font_path: DEFAULT_FONT_PATH.to_string(),
            render_scale: 2,
            max_upload_size_bytes: 50 * 1024 * 1024,
            allowed_extensions: vec!["pdf".to_string()],
            allowed_content_types: vec!["application/pdf".to_string()],
            signing_base_path: None,
            signing_account_id: None,
            signing_integration_key: None,
            signing_user_id: None,
            signing_auth_server: None,
            signing_private_key_path: None,
            signing_return_url: None,
        }
    }

    #[test]
    fn test_is_production_matches_prod_aliases() {
        let mut cfg = service_config();
        cfg.base.environment = "Production".to_string();
        assert!(Config(Box::new(cfg)).is_production());

        let mut cfg = service_config();
        cfg.base.environment = "prod".to_string();
        assert!(Config(Box::new(cfg)).is_production());

        let cfg = service_config();
        assert!(!Config(Box::new(cfg)).is_production());
    }

    #[test]
    fn test_getters_expose_nested_fields() {
        let config = Config(Box::new(service_config()));
        assert_eq!(config.server_port(), 4000);
        assert_eq!(config.sign_in_path(), "/sign-in");
        assert_eq!(config.storage_backend(), Some(StorageBackend::Local));
        assert_eq!(config.completion_endpoint(), "http://localhost:5000/chat");
    }
}
