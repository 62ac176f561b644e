//! HTTP middleware implementations
//!
//! - [`AuthMiddleware`] establishes who is calling
//! - [`RequireAccess`] decides whether they may call a scope

mod access;
mod auth;
mod helpers;


pub use access::{AccessRule, RequireAccess, RequireAccessService};
pub use auth::{AuthMiddleware, AuthMiddlewareService};
pub use helpers::extract_auth_method;
