//! Utility modules for the backend
//!
//! - **crypto**: password hashing
//! - **error**: the crate error type and its HTTP mapping
//! - **validation**: input validation helpers

pub mod crypto;
pub mod error;
pub mod validation;
