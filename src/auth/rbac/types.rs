//! RBAC type definitions

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Identity class of an account.
///
/// The set is closed: a role string that does not name one of these variants
/// is never granted anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Admin,
    WarehouseManager,
    EmployeeManager,
    Employee,
    Customer,
    Accounting,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::WarehouseManager,
        Role::EmployeeManager,
        Role::Employee,
        Role::Customer,
        Role::Accounting,
    ];

    /// Canonical name, as carried in tokens and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::WarehouseManager => "WarehouseManager",
            Role::EmployeeManager => "EmployeeManager",
            Role::Employee => "Employee",
            Role::Customer => "Customer",
            Role::Accounting => "Accounting",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown role: {}", s))
    }
}

/// Capability token checked by route guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Permission {
    ViewProducts,
    PlaceOrders,
    ViewOwnProfile,
    SubmitReports,
    ViewSuppliers,
    ManageEmployees,
    ManageSchedules,
    ViewEmployeeRecords,
    ViewAllReports,
    ManageInventory,
    ManageProducts,
    ManageMenu,
    ManageSuppliers,
    ManageExports,
    ViewFinancials,
    ManageSales,
    ManageVouchers,
    ViewCustomers,
    ManageCustomers,
    ManageAccounts,
}

impl Permission {
    /// Every permission, in declaration order
    pub const ALL: [Permission; 20] = [
        Permission::ViewProducts,
        Permission::PlaceOrders,
        Permission::ViewOwnProfile,
        Permission::SubmitReports,
        Permission::ViewSuppliers,
        Permission::ManageEmployees,
        Permission::ManageSchedules,
        Permission::ViewEmployeeRecords,
        Permission::ViewAllReports,
        Permission::ManageInventory,
        Permission::ManageProducts,
        Permission::ManageMenu,
        Permission::ManageSuppliers,
        Permission::ManageExports,
        Permission::ViewFinancials,
        Permission::ManageSales,
        Permission::ManageVouchers,
        Permission::ViewCustomers,
        Permission::ManageCustomers,
        Permission::ManageAccounts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewProducts => "ViewProducts",
            Permission::PlaceOrders => "PlaceOrders",
            Permission::ViewOwnProfile => "ViewOwnProfile",
            Permission::SubmitReports => "SubmitReports",
            Permission::ViewSuppliers => "ViewSuppliers",
            Permission::ManageEmployees => "ManageEmployees",
            Permission::ManageSchedules => "ManageSchedules",
            Permission::ViewEmployeeRecords => "ViewEmployeeRecords",
            Permission::ViewAllReports => "ViewAllReports",
            Permission::ManageInventory => "ManageInventory",
            Permission::ManageProducts => "ManageProducts",
            Permission::ManageMenu => "ManageMenu",
            Permission::ManageSuppliers => "ManageSuppliers",
            Permission::ManageExports => "ManageExports",
            Permission::ViewFinancials => "ViewFinancials",
            Permission::ManageSales => "ManageSales",
            Permission::ManageVouchers => "ManageVouchers",
            Permission::ViewCustomers => "ViewCustomers",
            Permission::ManageCustomers => "ManageCustomers",
            Permission::ManageAccounts => "ManageAccounts",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|permission| permission.as_str() == s)
            .ok_or_else(|| format!("unknown permission: {}", s))
    }
}

/// A role string after the one-time boundary parse.
///
/// Everything downstream of token decoding works on this type; the raw
/// string of an unrecognized claim is only kept for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleClaim {
    Valid(Role),
    Invalid(String),
}

impl RoleClaim {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<Role>() {
            Ok(role) => RoleClaim::Valid(role),
            Err(_) => RoleClaim::Invalid(raw.to_string()),
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            RoleClaim::Valid(role) => Some(*role),
            RoleClaim::Invalid(_) => None,
        }
    }
}

impl From<Role> for RoleClaim {
    fn from(role: Role) -> Self {
        RoleClaim::Valid(role)
    }
}

impl fmt::Display for RoleClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleClaim::Valid(role) => write!(f, "{}", role),
            RoleClaim::Invalid(raw) => write!(f, "{:?} (invalid)", raw),
        }
    }
}

/// Attributes of one role in the registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDefinition {
    /// Whether the role passes manager-only gates
    pub is_manager: bool,
    /// Universal wildcard: satisfies every permission check
    pub grants_all: bool,
    /// Permissions granted directly to this role
    pub direct_permissions: HashSet<Permission>,
    /// Roles whose effective permissions this role also receives
    pub inherits_from: Vec<Role>,
}

impl RoleDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manager(mut self) -> Self {
        self.is_manager = true;
        self
    }

    pub fn wildcard(mut self) -> Self {
        self.grants_all = true;
        self
    }

    pub fn grants<I>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = Permission>,
    {
        self.direct_permissions.extend(permissions);
        self
    }

    pub fn inherits<I>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        self.inherits_from.extend(parents);
        self
    }
}

/// What a protected endpoint demands of the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessRequirement {
    /// Any verified identity, whatever its role claim
    Authenticated,
    Permission(Permission),
    AllPermissions(Vec<Permission>),
    /// Coverage of every permission the role holds directly
    Role(Role),
    Manager,
}

impl fmt::Display for AccessRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessRequirement::Authenticated => f.write_str("authenticated"),
            AccessRequirement::Permission(p) => write!(f, "permission {}", p),
            AccessRequirement::AllPermissions(ps) => {
                let names: Vec<&str> = ps.iter().map(Permission::as_str).collect();
                write!(f, "permissions [{}]", names.join(", "))
            }
            AccessRequirement::Role(role) => write!(f, "role {}", role),
            AccessRequirement::Manager => f.write_str("manager role"),
        }
    }
}

/// Permission check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionCheck {
    /// Whether access is granted
    pub granted: bool,
    /// Role the decision was made for, if the claim was valid
    pub role: Option<Role>,
    /// Reason for denial (if not granted)
    pub denial_reason: Option<String>,
}

impl PermissionCheck {
    pub(super) fn allow(role: Option<Role>) -> Self {
        Self {
            granted: true,
            role,
            denial_reason: None,
        }
    }

    pub(super) fn deny(role: Option<Role>, reason: String) -> Self {
        Self {
            granted: false,
            role,
            denial_reason: Some(reason),
        }
    }
}
