//! Authorization decision engine

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use super::registry::RoleRegistry;
use super::types::{AccessRequirement, Permission, PermissionCheck, Role, RoleClaim};

/// Answers allow/deny questions for a role claim against the registry.
///
/// Every decision is a pure function of the claim and the immutable
/// registry; invalid claims are denied, never reported as errors.
#[derive(Debug, Clone)]
pub struct Authorizer {
    registry: Arc<RoleRegistry>,
}

impl Authorizer {
    pub fn new(registry: Arc<RoleRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    /// Admin, or any role defined with the wildcard
    fn holds_wildcard(&self, role: Role) -> bool {
        role == Role::Admin
            || self
                .registry
                .definition(role)
                .is_some_and(|definition| definition.grants_all)
    }

    /// Effective permission set of a role (empty if the role is undefined)
    pub fn resolve_permissions(&self, role: Role) -> HashSet<Permission> {
        self.registry
            .effective_permissions(role)
            .cloned()
            .unwrap_or_default()
    }

    pub fn has_permission(&self, claim: &RoleClaim, required: Permission) -> bool {
        let Some(role) = claim.role() else {
            return false;
        };

        if self.holds_wildcard(role) {
            return true;
        }

        self.registry
            .effective_permissions(role)
            .is_some_and(|permissions| permissions.contains(&required))
    }

    /// True iff every required permission is held; an empty list is
    /// satisfied by any valid claim
    pub fn has_all_permissions(&self, claim: &RoleClaim, required: &[Permission]) -> bool {
        let Some(role) = claim.role() else {
            return false;
        };

        if self.holds_wildcard(role) {
            return true;
        }

        required
            .iter()
            .all(|permission| self.has_permission(claim, *permission))
    }

    /// Role gate expressed as permission coverage: the caller must hold
    /// every permission `required_role` grants directly.
    ///
    /// Unrelated roles with overlapping grants satisfy each other's gate.
    /// A wildcard role can only be covered by another wildcard holder, and
    /// an undefined role cannot be covered at all.
    pub fn has_required_role(&self, claim: &RoleClaim, required_role: Role) -> bool {
        let Some(role) = claim.role() else {
            return false;
        };

        if self.holds_wildcard(role) {
            return true;
        }

        if self.holds_wildcard(required_role) {
            return false;
        }

        let Some(required) = self.registry.direct_permissions(required_role) else {
            return false;
        };

        let required: Vec<Permission> = required.iter().copied().collect();
        self.has_all_permissions(claim, &required)
    }

    /// Manager-only gate; Admin always passes
    pub fn is_manager_role(&self, claim: &RoleClaim) -> bool {
        let Some(role) = claim.role() else {
            return false;
        };

        role == Role::Admin
            || self
                .registry
                .definition(role)
                .is_some_and(|definition| definition.is_manager)
    }

    /// Sorted effective permissions for display; wildcard holders list every
    /// permission
    pub fn effective_permissions(&self, claim: &RoleClaim) -> Vec<Permission> {
        let Some(role) = claim.role() else {
            return Vec::new();
        };

        let mut permissions: Vec<Permission> = if self.holds_wildcard(role) {
            Permission::ALL.to_vec()
        } else {
            self.resolve_permissions(role).into_iter().collect()
        };
        permissions.sort();
        permissions
    }

    /// Evaluate an endpoint requirement with a denial reason
    pub fn check(&self, claim: &RoleClaim, requirement: &AccessRequirement) -> PermissionCheck {
        let role = claim.role();

        let granted = match requirement {
            AccessRequirement::Authenticated => true,
            AccessRequirement::Permission(permission) => self.has_permission(claim, *permission),
            AccessRequirement::AllPermissions(permissions) => {
                self.has_all_permissions(claim, permissions)
            }
            AccessRequirement::Role(required_role) => self.has_required_role(claim, *required_role),
            AccessRequirement::Manager => self.is_manager_role(claim),
        };

        debug!(role = %claim, %requirement, granted, "Authorization decision");

        if granted {
            PermissionCheck::allow(role)
        } else if role.is_none() {
            PermissionCheck::deny(role, format!("Unrecognized role claim {}", claim))
        } else {
            PermissionCheck::deny(role, format!("Missing {}", requirement))
        }
    }
}
