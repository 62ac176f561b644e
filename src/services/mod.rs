//! Services module
//!
//! Business logic that spans more than one collection.

pub mod sales;

pub use sales::{SaleLineRequest, SaleRequest, SalesService};
