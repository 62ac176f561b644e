//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::storage::DocumentStore;
use crate::utils::error::{Result, ShopError};
use std::sync::Arc;
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    store: Option<Arc<dyn DocumentStore>>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a specific document store instead of a fresh in-memory one
    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| ShopError::Config("Configuration is required".to_string()))?;

        match self.store {
            Some(store) => HttpServer::with_store(&config, store).await,
            None => HttpServer::new(&config).await,
        }
    }
}

/// Run the server with an already loaded configuration
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting coffeeshop backend");

    let server = ServerBuilder::new().with_config(config).build().await?;
    info!("Server starting at: http://{}", server.config().address());
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /auth/register, /auth/login, /auth/refresh");
    info!("   GET  /auth/me, /roles, /accounts");
    info!("   CRUD /products, /menu-items, /suppliers, /stock, /employees,");
    info!("        /customers, /exports, /vouchers, /sales");

    server.start().await
}
