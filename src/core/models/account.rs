//! Login accounts

use super::resource::{Collection, Resource};
use crate::auth::rbac::Role;
use crate::utils::error::Result;
use crate::utils::validation::DataValidator;
use serde::{Deserialize, Serialize};

/// A login account; the role decides what the bearer may do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Username (unique)
    pub username: String,
    /// Email address (unique)
    pub email: String,
    /// Argon2 password hash
    pub password_hash: String,
    /// Account role
    pub role: Role,
    /// Disabled accounts cannot log in
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Resource for Account {
    const COLLECTION: Collection = Collection::Accounts;
    const SEARCH_FIELDS: &'static [&'static str] = &["username", "email"];
    const UNIQUE_FIELDS: &'static [&'static str] = &["username", "email"];

    fn validate(&self) -> Result<()> {
        DataValidator::validate_username(&self.username)?;
        DataValidator::validate_email(&self.email)?;
        DataValidator::require_text("password_hash", &self.password_hash)
    }
}

/// Account as returned over HTTP, without the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountView {
    pub username: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            username: account.username,
            email: account.email,
            role: account.role,
            active: account.active,
        }
    }
}
