//! Sales and discount vouchers

use super::resource::{Collection, Resource};
use crate::utils::error::{Result, ShopError};
use crate::utils::validation::DataValidator;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One priced line of a sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub menu_item_id: Uuid,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

fn out_of_range() -> ShopError {
    ShopError::validation("amount out of range")
}

impl SaleLine {
    pub fn line_total_cents(&self) -> Result<i64> {
        self.unit_price_cents
            .checked_mul(i64::from(self.quantity))
            .ok_or_else(out_of_range)
    }

    /// Sum of the line totals
    pub fn subtotal_cents(lines: &[SaleLine]) -> Result<i64> {
        lines.iter().try_fold(0i64, |subtotal, line| {
            subtotal
                .checked_add(line.line_total_cents()?)
                .ok_or_else(out_of_range)
        })
    }
}

/// A completed sale with its totals fixed at checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    #[serde(default)]
    pub customer_id: Option<Uuid>,
    /// Account that recorded the sale
    #[serde(default)]
    pub recorded_by: Option<Uuid>,
    pub lines: Vec<SaleLine>,
    #[serde(default)]
    pub voucher_code: Option<String>,
    pub subtotal_cents: i64,
    #[serde(default)]
    pub discount_cents: i64,
    pub total_cents: i64,
}

impl Resource for Sale {
    const COLLECTION: Collection = Collection::Sales;
    const SEARCH_FIELDS: &'static [&'static str] = &["voucher_code"];

    fn validate(&self) -> Result<()> {
        if self.lines.is_empty() {
            return Err(ShopError::validation("A sale needs at least one line"));
        }

        for line in &self.lines {
            if line.quantity == 0 {
                return Err(ShopError::validation("Line quantity must be positive"));
            }
            DataValidator::require_non_negative("unit_price_cents", line.unit_price_cents)?;
        }

        let subtotal = SaleLine::subtotal_cents(&self.lines)?;
        if subtotal != self.subtotal_cents {
            return Err(ShopError::validation("subtotal_cents does not match the lines"));
        }

        if self.discount_cents < 0 || self.discount_cents > self.subtotal_cents {
            return Err(ShopError::validation("discount_cents out of range"));
        }

        if self.total_cents != self.subtotal_cents - self.discount_cents {
            return Err(ShopError::validation("total_cents does not match subtotal and discount"));
        }

        Ok(())
    }
}

/// Percentage discount code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    /// Code typed at checkout (unique)
    pub code: String,
    /// 1 to 100
    pub discount_percent: u8,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    /// Unlimited when absent
    #[serde(default)]
    pub max_uses: Option<u32>,
    #[serde(default)]
    pub times_used: u32,
}

impl Voucher {
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.valid_from <= date && date <= self.valid_until
    }

    pub fn has_uses_left(&self) -> bool {
        self.max_uses.is_none_or(|max| self.times_used < max)
    }

    /// Discount for a subtotal, rounded down to the cent
    pub fn discount_for(&self, subtotal_cents: i64) -> Result<i64> {
        subtotal_cents
            .checked_mul(i64::from(self.discount_percent))
            .map(|scaled| scaled / 100)
            .ok_or_else(out_of_range)
    }
}

impl Resource for Voucher {
    const COLLECTION: Collection = Collection::Vouchers;
    const SEARCH_FIELDS: &'static [&'static str] = &["code"];
    const UNIQUE_FIELDS: &'static [&'static str] = &["code"];

    fn validate(&self) -> Result<()> {
        DataValidator::require_text("code", &self.code)?;

        if !(1..=100).contains(&self.discount_percent) {
            return Err(ShopError::validation("discount_percent must be between 1 and 100"));
        }

        if self.valid_until < self.valid_from {
            return Err(ShopError::validation("valid_until precedes valid_from"));
        }

        if let Some(max) = self.max_uses {
            if self.times_used > max {
                return Err(ShopError::validation("times_used exceeds max_uses"));
            }
        }

        Ok(())
    }
}
