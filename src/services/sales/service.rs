//! Sales service implementation

use super::types::SaleRequest;
use crate::core::models::{Customer, MenuItem, Record, Sale, SaleLine, Voucher};
use crate::storage::{DocumentStore, Repository};
use crate::utils::error::{Result, ShopError};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Records sales against the menu and voucher collections
#[derive(Debug, Clone)]
pub struct SalesService {
    menu: Repository<MenuItem>,
    customers: Repository<Customer>,
    vouchers: Repository<Voucher>,
    sales: Repository<Sale>,
}

impl SalesService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            menu: Repository::new(Arc::clone(&store)),
            customers: Repository::new(Arc::clone(&store)),
            vouchers: Repository::new(Arc::clone(&store)),
            sales: Repository::new(store),
        }
    }

    /// Price the order from the menu, redeem its voucher and store the sale
    ///
    /// The voucher use is taken atomically, so a voucher with one use left
    /// is redeemed by at most one concurrent sale.
    pub async fn record_sale(
        &self,
        request: SaleRequest,
        recorded_by: Option<Uuid>,
        today: NaiveDate,
    ) -> Result<Record<Sale>> {
        let lines = self.price_lines(&request).await?;
        let subtotal_cents = SaleLine::subtotal_cents(&lines)?;

        if let Some(customer_id) = request.customer_id {
            if self.customers.find(customer_id).await?.is_none() {
                return Err(ShopError::validation(format!(
                    "Unknown customer {}",
                    customer_id
                )));
            }
        }

        let voucher = match request.voucher_code.as_deref() {
            Some(code) => Some(self.redeem_voucher(code, today).await?),
            None => None,
        };

        let discount_cents = match &voucher {
            Some(voucher) => match voucher.data.discount_for(subtotal_cents) {
                Ok(discount) => discount,
                Err(e) => {
                    self.release_voucher(voucher.id).await;
                    return Err(e);
                }
            },
            None => 0,
        };

        let sale = Sale {
            customer_id: request.customer_id,
            recorded_by,
            lines,
            voucher_code: voucher.as_ref().map(|voucher| voucher.data.code.clone()),
            subtotal_cents,
            discount_cents,
            total_cents: subtotal_cents - discount_cents,
        };

        match self.sales.create(sale).await {
            Ok(sale) => {
                info!(
                    "Recorded sale {}: {} lines, total {} cents",
                    sale.id,
                    sale.data.lines.len(),
                    sale.data.total_cents
                );
                Ok(sale)
            }
            Err(e) => {
                if let Some(voucher) = voucher {
                    self.release_voucher(voucher.id).await;
                }
                Err(e)
            }
        }
    }

    async fn price_lines(&self, request: &SaleRequest) -> Result<Vec<SaleLine>> {
        if request.lines.is_empty() {
            return Err(ShopError::validation("A sale needs at least one line"));
        }

        let mut lines = Vec::with_capacity(request.lines.len());
        for line in &request.lines {
            if line.quantity == 0 {
                return Err(ShopError::validation("Line quantity must be positive"));
            }

            let item = self.menu.find(line.menu_item_id).await?.ok_or_else(|| {
                ShopError::validation(format!("Unknown menu item {}", line.menu_item_id))
            })?;

            if !item.data.available {
                return Err(ShopError::validation(format!(
                    "{} is not available",
                    item.data.name
                )));
            }

            lines.push(SaleLine {
                menu_item_id: item.id,
                quantity: line.quantity,
                unit_price_cents: item.data.price_cents,
            });
        }

        Ok(lines)
    }

    async fn redeem_voucher(&self, code: &str, today: NaiveDate) -> Result<Record<Voucher>> {
        let voucher = self
            .vouchers
            .find_by("code", code)
            .await?
            .ok_or_else(|| ShopError::validation(format!("Unknown voucher {}", code)))?;

        self.vouchers
            .modify(voucher.id, move |voucher| {
                if !voucher.is_valid_on(today) {
                    return Err(ShopError::validation(format!(
                        "Voucher {} is not valid on {}",
                        voucher.code, today
                    )));
                }
                if !voucher.has_uses_left() {
                    return Err(ShopError::conflict(format!(
                        "Voucher {} has no uses left",
                        voucher.code
                    )));
                }
                voucher.times_used += 1;
                Ok(())
            })
            .await
    }

    async fn release_voucher(&self, voucher_id: Uuid) {
        let released = self
            .vouchers
            .modify(voucher_id, |voucher| {
                voucher.times_used = voucher.times_used.saturating_sub(1);
                Ok(())
            })
            .await;

        if let Err(e) = released {
            warn!("Failed to release voucher {}: {}", voucher_id, e);
        }
    }
}
