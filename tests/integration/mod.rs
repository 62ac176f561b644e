//! Integration tests for coffeeshop-rs
//!
//! These tests drive the full actix application with real components and
//! an in-memory store.

pub mod access_control_tests;
pub mod auth_flow_tests;
pub mod config_tests;
pub mod crud_tests;
pub mod sales_tests;
