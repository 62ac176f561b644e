//! Collection and record plumbing shared by all domain types

use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Named collections of the document store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Accounts,
    Employees,
    Customers,
    Products,
    MenuItems,
    Suppliers,
    Stock,
    Sales,
    Exports,
    Vouchers,
}

impl Collection {
    pub const ALL: [Collection; 10] = [
        Collection::Accounts,
        Collection::Employees,
        Collection::Customers,
        Collection::Products,
        Collection::MenuItems,
        Collection::Suppliers,
        Collection::Stock,
        Collection::Sales,
        Collection::Exports,
        Collection::Vouchers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Accounts => "accounts",
            Collection::Employees => "employees",
            Collection::Customers => "customers",
            Collection::Products => "products",
            Collection::MenuItems => "menu_items",
            Collection::Suppliers => "suppliers",
            Collection::Stock => "stock",
            Collection::Sales => "sales",
            Collection::Exports => "exports",
            Collection::Vouchers => "vouchers",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed document that lives in one collection
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection the records are stored in
    const COLLECTION: Collection;
    /// Top-level string fields matched by list searches
    const SEARCH_FIELDS: &'static [&'static str] = &[];
    /// Top-level fields whose values must be unique within the collection
    const UNIQUE_FIELDS: &'static [&'static str] = &[];

    /// Reject records that must never be stored
    fn validate(&self) -> Result<()>;
}

/// A stored record with its store-assigned metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Record<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Record<U> {
        Record {
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            data: f(self.data),
        }
    }
}
