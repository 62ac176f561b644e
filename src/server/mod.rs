//! HTTP server implementation
//!
//! This module provides the HTTP server and routing functionality.

pub mod middleware;
pub mod routes;

pub mod builder;
#[allow(clippy::module_inception)]
pub mod server;
pub mod state;


pub use builder::{ServerBuilder, run_server};
pub use server::{HttpServer, create_app};
pub use state::AppState;
