//! Role registry: the immutable role table consulted by the authorizer

use std::collections::{BTreeMap, HashMap, HashSet};

use thiserror::Error;
use tracing::{debug, info};

use super::resolver::resolve_permissions;
use super::types::{Permission, Role, RoleDefinition};
use crate::config::{RbacConfig, RoleConfig};

/// Defects in a role table. Each one aborts startup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown role name {0:?}")]
    UnknownRole(String),

    #[error("role {role} grants unknown permission {permission:?}")]
    UnknownPermission { role: Role, permission: String },

    #[error("role {referenced_by} inherits from {role}, which has no definition")]
    MissingDefinition { role: Role, referenced_by: Role },

    #[error("inheritance cycle: {}", format_cycle(.0))]
    InheritanceCycle(Vec<Role>),
}

fn format_cycle(path: &[Role]) -> String {
    path.iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Immutable mapping from role to definition.
///
/// Built once at startup and shared read-only; effective permission sets
/// are computed during `build` since the table never changes afterwards.
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    definitions: HashMap<Role, RoleDefinition>,
    effective: HashMap<Role, HashSet<Permission>>,
}

impl RoleRegistry {
    pub fn builder() -> RoleRegistryBuilder {
        RoleRegistryBuilder::default()
    }

    /// The shop's built-in role table
    pub fn standard() -> Result<Self, RegistryError> {
        use Permission::*;

        Self::builder()
            .define(Role::Admin, RoleDefinition::new().wildcard())
            .define(
                Role::Customer,
                RoleDefinition::new().grants([ViewProducts, PlaceOrders]),
            )
            .define(
                Role::Employee,
                RoleDefinition::new()
                    .inherits([Role::Customer])
                    .grants([ViewOwnProfile, SubmitReports, ViewSuppliers]),
            )
            .define(
                Role::EmployeeManager,
                RoleDefinition::new()
                    .manager()
                    .inherits([Role::Employee])
                    .grants([
                        ManageEmployees,
                        ManageSchedules,
                        ViewEmployeeRecords,
                        ViewAllReports,
                    ]),
            )
            .define(
                Role::WarehouseManager,
                RoleDefinition::new()
                    .manager()
                    .inherits([Role::Employee])
                    .grants([
                        ManageInventory,
                        ManageProducts,
                        ManageMenu,
                        ManageSuppliers,
                        ManageExports,
                    ]),
            )
            .define(
                Role::Accounting,
                RoleDefinition::new().inherits([Role::Employee]).grants([
                    ViewFinancials,
                    ManageSales,
                    ManageVouchers,
                    ViewCustomers,
                    ManageCustomers,
                    ViewAllReports,
                ]),
            )
            .build()
    }

    /// Build from configuration, falling back to the standard table when no
    /// roles are configured
    pub fn from_config(config: &RbacConfig) -> Result<Self, RegistryError> {
        if config.roles.is_empty() {
            debug!("No role table configured, using standard roles");
            return Self::standard();
        }

        let mut builder = Self::builder();
        for (name, role_config) in &config.roles {
            let role: Role = name
                .parse()
                .map_err(|_| RegistryError::UnknownRole(name.clone()))?;
            builder = builder.define(role, definition_from_config(role, role_config)?);
        }

        builder.build()
    }

    pub fn definition(&self, role: Role) -> Option<&RoleDefinition> {
        self.definitions.get(&role)
    }

    pub fn direct_permissions(&self, role: Role) -> Option<&HashSet<Permission>> {
        self.definitions
            .get(&role)
            .map(|definition| &definition.direct_permissions)
    }

    /// Transitive permission set; `None` when the role has no definition
    pub fn effective_permissions(&self, role: Role) -> Option<&HashSet<Permission>> {
        self.effective.get(&role)
    }

    /// Defined roles in declaration order
    pub fn roles(&self) -> Vec<(Role, &RoleDefinition)> {
        let mut roles: Vec<_> = self
            .definitions
            .iter()
            .map(|(role, definition)| (*role, definition))
            .collect();
        roles.sort_by_key(|(role, _)| *role);
        roles
    }
}

fn definition_from_config(role: Role, config: &RoleConfig) -> Result<RoleDefinition, RegistryError> {
    let mut definition = RoleDefinition {
        is_manager: config.is_manager,
        grants_all: config.grants_all,
        ..RoleDefinition::default()
    };

    for name in &config.permissions {
        let permission = name
            .parse()
            .map_err(|_| RegistryError::UnknownPermission {
                role,
                permission: name.clone(),
            })?;
        definition.direct_permissions.insert(permission);
    }

    for name in &config.inherits_from {
        let parent = name
            .parse()
            .map_err(|_| RegistryError::UnknownRole(name.clone()))?;
        definition.inherits_from.push(parent);
    }

    Ok(definition)
}

/// Accumulates role definitions and validates them as a whole
#[derive(Debug, Default)]
pub struct RoleRegistryBuilder {
    definitions: BTreeMap<Role, RoleDefinition>,
}

impl RoleRegistryBuilder {
    /// Add or replace the definition of `role`
    pub fn define(mut self, role: Role, definition: RoleDefinition) -> Self {
        self.definitions.insert(role, definition);
        self
    }

    pub fn build(self) -> Result<RoleRegistry, RegistryError> {
        for (role, definition) in &self.definitions {
            for parent in &definition.inherits_from {
                if !self.definitions.contains_key(parent) {
                    return Err(RegistryError::MissingDefinition {
                        role: *parent,
                        referenced_by: *role,
                    });
                }
            }
        }

        if let Some(cycle) = find_cycle(&self.definitions) {
            return Err(RegistryError::InheritanceCycle(cycle));
        }

        let definitions: HashMap<Role, RoleDefinition> = self.definitions.into_iter().collect();
        let effective = definitions
            .keys()
            .map(|role| (*role, resolve_permissions(&definitions, *role)))
            .collect();

        info!("Role registry built with {} roles", definitions.len());
        Ok(RoleRegistry {
            definitions,
            effective,
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Depth-first search for a back edge; returns the cycle as a closed path
fn find_cycle(definitions: &BTreeMap<Role, RoleDefinition>) -> Option<Vec<Role>> {
    let mut marks: HashMap<Role, Mark> = HashMap::new();
    let mut path = Vec::new();

    for role in definitions.keys() {
        if let Some(cycle) = visit(definitions, *role, &mut marks, &mut path) {
            return Some(cycle);
        }
    }
    None
}

fn visit(
    definitions: &BTreeMap<Role, RoleDefinition>,
    role: Role,
    marks: &mut HashMap<Role, Mark>,
    path: &mut Vec<Role>,
) -> Option<Vec<Role>> {
    match marks.get(&role) {
        Some(Mark::Done) => return None,
        Some(Mark::InProgress) => {
            let start = path.iter().position(|r| *r == role).unwrap_or(0);
            let mut cycle = path[start..].to_vec();
            cycle.push(role);
            return Some(cycle);
        }
        None => {}
    }

    marks.insert(role, Mark::InProgress);
    path.push(role);

    if let Some(definition) = definitions.get(&role) {
        for parent in &definition.inherits_from {
            if let Some(cycle) = visit(definitions, *parent, marks, path) {
                return Some(cycle);
            }
        }
    }

    path.pop();
    marks.insert(role, Mark::Done);
    None
}
