//! Role-Based Access Control (RBAC) system
//!
//! Roles map to permission sets through a static registry with role
//! inheritance; the authorizer turns a role claim plus an endpoint
//! requirement into an allow/deny decision.

mod authorizer;
mod registry;
mod resolver;
mod types;

// Re-export public types and structs
pub use authorizer::Authorizer;
pub use registry::{RegistryError, RoleRegistry, RoleRegistryBuilder};
pub use resolver::resolve_permissions;
pub use types::{AccessRequirement, Permission, PermissionCheck, Role, RoleClaim, RoleDefinition};
