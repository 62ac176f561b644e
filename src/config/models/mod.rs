//! Configuration data models
//!
//! This module defines all configuration structures used by the backend.

pub mod auth;
pub mod server;
pub mod shop;
pub mod storage;

// Re-export all configuration types
pub use auth::*;
pub use server::*;
pub use shop::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    1024 * 1024 // 1MB
}

pub fn default_cors_max_age() -> u32 {
    3600
}

/// Access token lifetime in seconds
pub fn default_jwt_expiration() -> u64 {
    3600
}

pub fn default_jwt_issuer() -> String {
    "coffeeshop-rs".to_string()
}

/// Role given to self-registered accounts
pub fn default_role() -> String {
    "Customer".to_string()
}

pub fn default_page_size() -> u32 {
    20
}

pub fn default_max_page_size() -> u32 {
    100
}
