//! Checkout request types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One ordered menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLineRequest {
    pub menu_item_id: Uuid,
    pub quantity: u32,
}

/// An order as submitted at the counter; prices come from the menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRequest {
    #[serde(default)]
    pub customer_id: Option<Uuid>,
    pub lines: Vec<SaleLineRequest>,
    #[serde(default)]
    pub voucher_code: Option<String>,
}
