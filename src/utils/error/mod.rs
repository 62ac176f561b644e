//! Error handling for the backend
//!
//! A single error enum is used across the crate; the HTTP mapping lives in
//! `response` so handlers can return `Result<HttpResponse>` directly.

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{Result, ShopError};
