//! Application state shared across HTTP handlers

use crate::auth::AuthSystem;
use crate::config::Config;
use crate::services::SalesService;
use crate::storage::DocumentStore;
use crate::utils::error::Result;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc so cloning per worker is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Backend configuration (shared read-only)
    pub config: Arc<Config>,
    /// Accounts, tokens and authorization decisions
    pub auth: Arc<AuthSystem>,
    /// Document store behind every repository
    pub store: Arc<dyn DocumentStore>,
    /// Checkout logic
    pub sales: Arc<SalesService>,
}

impl AppState {
    /// Wire the auth system and services onto a store
    pub fn new(config: Config, store: Arc<dyn DocumentStore>) -> Result<Self> {
        let auth = AuthSystem::new(&config.shop.auth, Arc::clone(&store))?;
        let sales = SalesService::new(Arc::clone(&store));

        Ok(Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            store,
            sales: Arc::new(sales),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
