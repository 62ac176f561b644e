//! Server configuration

use super::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of worker threads (defaults to actix's choice)
    pub workers: Option<usize>,
    /// Maximum JSON body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            max_body_size: default_max_body_size(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            return Err("Max body size cannot be 0".to_string());
        }

        if self.workers == Some(0) {
            return Err("Worker count cannot be 0".to_string());
        }

        Ok(())
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Enable CORS handling
    #[serde(default)]
    pub enabled: bool,
    /// Allowed origins; `*` allows any
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    /// Preflight cache lifetime in seconds
    #[serde(default = "default_cors_max_age")]
    pub max_age: u32,
    /// Allow credentials
    #[serde(default)]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            allowed_origins: vec![],
            max_age: default_cors_max_age(),
            allow_credentials: false,
        }
    }
}

impl CorsConfig {
    pub fn allows_all_origins(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }

    /// Validate CORS configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.enabled && self.allows_all_origins() && self.allow_credentials {
            return Err(
                "CORS cannot allow credentials while accepting every origin".to_string(),
            );
        }

        if self.enabled && self.allows_all_origins() {
            warn!("CORS allows all origins; restrict allowed_origins in production");
        }

        Ok(())
    }
}
