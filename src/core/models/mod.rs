//! Domain records stored in the document store
//!
//! Every record type implements [`Resource`], which ties it to a collection
//! and supplies the validation the store runs before writes.

mod account;
mod catalogue;
mod inventory;
mod resource;
mod sales;
mod staff;

pub use account::{Account, AccountView};
pub use catalogue::{MenuItem, Product, Supplier};
pub use inventory::{Export, StockItem};
pub use resource::{Collection, Record, Resource};
pub use sales::{Sale, SaleLine, Voucher};
pub use staff::{Customer, Employee};
