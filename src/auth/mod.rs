//! Authentication and authorization system
//!
//! Accounts log in with a password and receive bearer tokens carrying their
//! role. The [`rbac`] module decides what a role may do.

pub mod jwt;
pub mod rbac;
mod system;
mod types;


pub use system::AuthSystem;
pub use types::{AuthMethod, Identity, LoginRequest, RefreshRequest, RegisterRequest, RoleChange};
