//! # coffeeshop-rs
//!
//! Management backend for a small coffeeshop. Accounts, staff, customers,
//! the product catalogue and menu, warehouse stock, exports, sales and
//! vouchers are exposed as JSON CRUD endpoints, each guarded by role-based
//! access control.
//!
//! ## Access control
//!
//! Every account has one [`Role`](auth::rbac::Role). Roles grant
//! [`Permission`](auth::rbac::Permission)s directly and inherit the
//! permissions of their parent roles; `Admin` passes every check.
//!
//! ```rust
//! use coffeeshop_rs::auth::rbac::{Authorizer, Permission, Role, RoleClaim, RoleRegistry};
//! use std::sync::Arc;
//!
//! let registry = RoleRegistry::standard().unwrap();
//! let authorizer = Authorizer::new(Arc::new(registry));
//!
//! let warehouse = RoleClaim::Valid(Role::WarehouseManager);
//! assert!(authorizer.has_permission(&warehouse, Permission::ManageInventory));
//! assert!(authorizer.has_permission(&warehouse, Permission::PlaceOrders));
//! assert!(!authorizer.has_permission(&warehouse, Permission::ViewFinancials));
//! ```
//!
//! ## Running the server
//!
//! ```rust,no_run
//! use coffeeshop_rs::{Config, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/coffeeshop.yaml").await?;
//!     server::run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{Result, ShopError};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (seconds since the epoch)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        }
    }
}

/// Build information of this binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
