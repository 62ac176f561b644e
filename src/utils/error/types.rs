//! Error types for the backend

use crate::auth::rbac::RegistryError;
use thiserror::Error;

/// Result type alias for the backend
pub type Result<T> = std::result::Result<T, ShopError>;

/// Main error type for the backend
#[derive(Error, Debug)]
pub enum ShopError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Role registry defects detected at startup
    #[error("Role registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JWT errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Authentication errors (bad credentials)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Missing or unverifiable identity
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Identity present but not allowed
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict errors
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Crypto errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
