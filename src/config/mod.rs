//! Configuration management for the backend
//!
//! This module handles loading, validation, and environment overrides of the
//! backend configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{Result, ShopError};
use std::path::Path;
use tracing::{debug, info, warn};

/// Environment variable overriding the bind host
pub const ENV_HOST: &str = "COFFEESHOP_HOST";
/// Environment variable overriding the bind port
pub const ENV_PORT: &str = "COFFEESHOP_PORT";
/// Environment variable overriding the JWT secret
pub const ENV_JWT_SECRET: &str = "COFFEESHOP_JWT_SECRET";

/// Main configuration struct for the backend
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Backend configuration
    pub shop: ShopConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ShopError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let shop: ShopConfig = serde_yaml::from_str(content)
            .map_err(|e| ShopError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { shop };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables on top of defaults
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `COFFEESHOP_*` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var(ENV_HOST) {
            self.shop.server.host = host;
        }

        if let Ok(port) = std::env::var(ENV_PORT) {
            self.shop.server.port = port
                .parse()
                .map_err(|e| ShopError::Config(format!("Invalid {}: {}", ENV_PORT, e)))?;
        }

        if let Ok(secret) = std::env::var(ENV_JWT_SECRET) {
            self.shop.auth.jwt_secret = secret;
        }

        Ok(())
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.shop.server
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.shop.auth
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.shop.storage
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.shop
            .server
            .validate()
            .map_err(|e| ShopError::Config(format!("Server config error: {}", e)))?;

        self.shop
            .server
            .cors
            .validate()
            .map_err(|e| ShopError::Config(format!("CORS config error: {}", e)))?;

        self.shop
            .auth
            .validate()
            .map_err(|e| ShopError::Config(format!("Auth config error: {}", e)))?;

        self.shop
            .storage
            .validate()
            .map_err(|e| ShopError::Config(format!("Storage config error: {}", e)))?;

        if self.shop.auth.bootstrap_admin.is_none() {
            warn!("No bootstrap admin configured; account management needs an existing Admin");
        }

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.shop)
            .map_err(|e| ShopError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SECRET: &str = "Shop-Secret-Key-With-Enough-Length-123!";

    #[tokio::test]
    async fn test_config_from_file() {
        let config_content = format!(
            r#"
server:
  host: "127.0.0.1"
  port: 9090
auth:
  jwt_secret: "{SECRET}"
  jwt_expiration: 7200
  bootstrap_admin:
    username: owner
    email: owner@example.com
    password: "correct horse battery"
storage:
  default_page_size: 10
  max_page_size: 50
"#
        );

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();

        let config = Config::from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.server().address(), "127.0.0.1:9090");
        assert_eq!(config.auth().jwt_expiration, 7200);
        assert_eq!(config.auth().rbac.default_role, "Customer");
        assert_eq!(
            config.auth().bootstrap_admin.as_ref().unwrap().username,
            "owner"
        );
        assert_eq!(config.storage().max_page_size, 50);
    }

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let result = Config::from_file("/definitely/not/here.yaml").await;
        assert!(matches!(result, Err(ShopError::Config(_))));
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server().port, 8080);
        assert_eq!(config.storage().default_page_size, 20);
    }

    #[test]
    fn test_weak_secret_rejected() {
        let yaml = r#"
auth:
  jwt_secret: "short"
"#;
        assert!(matches!(Config::from_yaml(yaml), Err(ShopError::Config(_))));
    }

    #[test]
    fn test_admin_default_role_rejected() {
        let yaml = format!(
            r#"
auth:
  jwt_secret: "{SECRET}"
  rbac:
    default_role: Admin
"#
        );
        let err = Config::from_yaml(&yaml).unwrap_err();
        assert!(err.to_string().contains("Admin"));
    }

    #[test]
    fn test_unknown_default_role_rejected() {
        let yaml = format!(
            r#"
auth:
  jwt_secret: "{SECRET}"
  rbac:
    default_role: Barista
"#
        );
        assert!(Config::from_yaml(&yaml).is_err());
    }

    #[test]
    fn test_role_table_parses() {
        let yaml = format!(
            r#"
auth:
  jwt_secret: "{SECRET}"
  rbac:
    roles:
      Customer:
        permissions: [ViewProducts]
      Employee:
        is_manager: true
        permissions: [SubmitReports]
        inherits_from: [Customer]
"#
        );
        let config = Config::from_yaml(&yaml).unwrap();
        let roles = &config.auth().rbac.roles;
        assert_eq!(roles.len(), 2);
        assert!(roles["Employee"].is_manager);
        assert_eq!(roles["Employee"].inherits_from, vec!["Customer"]);
    }

    #[test]
    fn test_page_size_bounds() {
        let yaml = format!(
            r#"
auth:
  jwt_secret: "{SECRET}"
storage:
  default_page_size: 200
  max_page_size: 100
"#
        );
        assert!(Config::from_yaml(&yaml).is_err());
    }

    #[test]
    fn test_yaml_round_trip_keeps_server() {
        let mut config = Config::default();
        config.shop.server.port = 7000;
        let yaml = config.to_yaml().unwrap();
        let parsed = Config::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.server().port, 7000);
    }
}
