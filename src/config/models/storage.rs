//! Storage configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Page size used when a list request gives none
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Upper bound on requested page sizes
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err("Page sizes must be positive".to_string());
        }

        if self.default_page_size > self.max_page_size {
            return Err("Default page size cannot exceed max page size".to_string());
        }

        Ok(())
    }
}
