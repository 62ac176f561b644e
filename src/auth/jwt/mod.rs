//! JWT token handling
//!
//! Bearer tokens carry the account's role claim. Signature, issuer,
//! audience and expiry are checked here; the role string itself is only
//! parsed downstream.

mod handler;
pub mod types;
mod utils;


pub use types::{Claims, JwtHandler, TokenPair, TokenType};
