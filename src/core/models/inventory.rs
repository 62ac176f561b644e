//! Warehouse stock and outgoing exports

use super::resource::{Collection, Resource};
use crate::utils::error::{Result, ShopError};
use crate::utils::validation::DataValidator;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Quantity of one product held at one warehouse location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub product_id: Uuid,
    pub location: String,
    pub quantity: u32,
    /// Quantity at or below which the item needs reordering
    #[serde(default)]
    pub reorder_level: u32,
    #[serde(default)]
    pub supplier_id: Option<Uuid>,
}

impl StockItem {
    pub fn needs_reorder(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}

impl Resource for StockItem {
    const COLLECTION: Collection = Collection::Stock;
    const SEARCH_FIELDS: &'static [&'static str] = &["location"];

    fn validate(&self) -> Result<()> {
        DataValidator::require_text("location", &self.location)
    }
}

/// Goods shipped out of the warehouse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Export {
    pub product_id: Uuid,
    pub quantity: u32,
    pub destination: String,
    #[serde(default)]
    pub reason: Option<String>,
    pub exported_on: NaiveDate,
}

impl Resource for Export {
    const COLLECTION: Collection = Collection::Exports;
    const SEARCH_FIELDS: &'static [&'static str] = &["destination", "reason"];

    fn validate(&self) -> Result<()> {
        DataValidator::require_text("destination", &self.destination)?;
        if self.quantity == 0 {
            return Err(ShopError::validation("quantity must be positive"));
        }
        Ok(())
    }
}
