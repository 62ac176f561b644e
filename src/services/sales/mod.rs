//! Checkout: pricing sale lines and redeeming vouchers

mod service;
mod types;


pub use service::SalesService;
pub use types::{SaleLineRequest, SaleRequest};
