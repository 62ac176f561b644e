//! Products, menu items and suppliers

use super::resource::{Collection, Resource};
use crate::utils::error::{Result, ShopError};
use crate::utils::validation::DataValidator;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stocked product (beans, milk, cups, retail goods)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    /// Stock keeping unit (unique)
    pub sku: String,
    pub category: String,
    pub unit_price_cents: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<Uuid>,
}

impl Resource for Product {
    const COLLECTION: Collection = Collection::Products;
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "sku", "category"];
    const UNIQUE_FIELDS: &'static [&'static str] = &["sku"];

    fn validate(&self) -> Result<()> {
        DataValidator::require_text("name", &self.name)?;
        DataValidator::require_text("sku", &self.sku)?;
        DataValidator::require_text("category", &self.category)?;
        DataValidator::require_non_negative("unit_price_cents", self.unit_price_cents)
    }
}

/// Item sold over the counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub category: String,
    pub price_cents: i64,
    /// Products consumed by one serving
    #[serde(default)]
    pub ingredients: Vec<Uuid>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Resource for MenuItem {
    const COLLECTION: Collection = Collection::MenuItems;
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "category"];
    const UNIQUE_FIELDS: &'static [&'static str] = &["name"];

    fn validate(&self) -> Result<()> {
        DataValidator::require_text("name", &self.name)?;
        DataValidator::require_text("category", &self.category)?;
        if self.price_cents <= 0 {
            return Err(ShopError::validation("price_cents must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Resource for Supplier {
    const COLLECTION: Collection = Collection::Suppliers;
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "contact_name", "email"];
    const UNIQUE_FIELDS: &'static [&'static str] = &["name"];

    fn validate(&self) -> Result<()> {
        DataValidator::require_text("name", &self.name)?;
        if let Some(email) = &self.email {
            DataValidator::validate_email(email)?;
        }
        Ok(())
    }
}
