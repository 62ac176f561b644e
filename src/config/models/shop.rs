//! Top-level backend configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Everything read from the configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Tokens, roles and the bootstrap account
    #[serde(default)]
    pub auth: AuthConfig,
    /// Document store settings
    #[serde(default)]
    pub storage: StorageConfig,
}
