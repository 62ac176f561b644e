//! Authentication types

use super::rbac::RoleClaim;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Credentials presented with a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// Bearer token from the Authorization header
    Jwt(String),
    /// No credentials
    None,
}

/// Who is making a request, as established from a verified token.
///
/// The role is the token's claim parsed once; an unrecognized claim is
/// kept as [`RoleClaim::Invalid`] and denied by every permission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub account_id: Uuid,
    pub username: String,
    pub role: RoleClaim,
}

/// Self-registration payload
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token refresh payload
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Body of a role change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleChange {
    pub role: String,
}
