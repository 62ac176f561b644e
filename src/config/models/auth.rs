//! Authentication configuration

use super::*;
use crate::auth::rbac::Role;
use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT secret
    #[serde(default = "generate_secure_jwt_secret")]
    pub jwt_secret: String,
    /// JWT expiration in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration: u64,
    /// JWT issuer
    #[serde(default = "default_jwt_issuer")]
    pub jwt_issuer: String,
    /// Admin account created at startup when missing
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
    /// RBAC configuration
    #[serde(default)]
    pub rbac: RbacConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: generate_secure_jwt_secret(),
            jwt_expiration: default_jwt_expiration(),
            jwt_issuer: default_jwt_issuer(),
            bootstrap_admin: None,
            rbac: RbacConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        // Validate JWT secret strength
        if self.jwt_secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long for security".to_string());
        }

        if self.jwt_secret.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(
                "JWT secret should contain mixed case letters, numbers, and special characters"
                    .to_string(),
            );
        }

        // Validate JWT expiration
        if self.jwt_expiration < 300 {
            return Err("JWT expiration should be at least 5 minutes (300 seconds)".to_string());
        }

        if self.jwt_expiration > 86400 * 30 {
            return Err(
                "JWT expiration should not exceed 30 days for security reasons".to_string(),
            );
        }

        if self.jwt_issuer.is_empty() {
            return Err("JWT issuer cannot be empty".to_string());
        }

        if let Some(admin) = &self.bootstrap_admin {
            admin.validate()?;
        }

        self.rbac.validate()
    }
}

/// Credentials of the account created on first start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdminConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl BootstrapAdminConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.username.is_empty() || self.email.is_empty() {
            return Err("Bootstrap admin needs a username and an email".to_string());
        }

        if self.password.len() < 8 {
            return Err("Bootstrap admin password must be at least 8 characters".to_string());
        }

        Ok(())
    }
}

/// RBAC configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Role given to self-registered accounts
    #[serde(default = "default_role")]
    pub default_role: String,
    /// Replacement role table; empty means the built-in table
    #[serde(default)]
    pub roles: BTreeMap<String, RoleConfig>,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            default_role: default_role(),
            roles: BTreeMap::new(),
        }
    }
}

impl RbacConfig {
    /// The default role, parsed
    pub fn parsed_default_role(&self) -> Result<Role, String> {
        self.default_role.parse()
    }

    /// Validate RBAC configuration. Role table contents are checked when
    /// the registry is built.
    pub fn validate(&self) -> Result<(), String> {
        let role = self.parsed_default_role()?;
        if role == Role::Admin {
            return Err("Default role for new accounts cannot be Admin".to_string());
        }
        Ok(())
    }
}

/// One role of a configured role table, by name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleConfig {
    #[serde(default)]
    pub is_manager: bool,
    #[serde(default)]
    pub grants_all: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub inherits_from: Vec<String>,
}

/// Generate a secure random JWT secret
fn generate_secure_jwt_secret() -> String {
    // Generate a 64-character secure random string
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}
