//! Effective permission resolution over the inheritance graph

use std::collections::{HashMap, HashSet};

use super::types::{Permission, Role, RoleDefinition};

/// Union of `role`'s direct permissions and those of every role it inherits
/// from, transitively.
///
/// Roles already visited are skipped, so a malformed (cyclic) table yields
/// the partial union instead of recursing forever. Roles without a
/// definition contribute nothing.
pub fn resolve_permissions(
    definitions: &HashMap<Role, RoleDefinition>,
    role: Role,
) -> HashSet<Permission> {
    let mut visited = HashSet::new();
    let mut permissions = HashSet::new();
    collect(definitions, role, &mut visited, &mut permissions);
    permissions
}

fn collect(
    definitions: &HashMap<Role, RoleDefinition>,
    role: Role,
    visited: &mut HashSet<Role>,
    permissions: &mut HashSet<Permission>,
) {
    if !visited.insert(role) {
        return;
    }

    let Some(definition) = definitions.get(&role) else {
        return;
    };

    permissions.extend(definition.direct_permissions.iter().copied());

    for parent in &definition.inherits_from {
        collect(definitions, *parent, visited, permissions);
    }
}
