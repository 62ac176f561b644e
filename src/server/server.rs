//! HTTP server core implementation

use crate::config::{Config, CorsConfig, ServerConfig};
use crate::server::middleware::AuthMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::{DocumentStore, MemoryStore};
use crate::utils::error::{Result, ShopError};
use actix_cors::Cors;
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::DefaultHeaders,
    web,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a server over an in-memory store
    pub async fn new(config: &Config) -> Result<Self> {
        Self::with_store(config, Arc::new(MemoryStore::new())).await
    }

    /// Create a server over the given store, creating the bootstrap admin if configured
    pub async fn with_store(config: &Config, store: Arc<dyn DocumentStore>) -> Result<Self> {
        info!("Creating HTTP server");

        let state = AppState::new(config.clone(), store)?;
        state.auth.bootstrap_admin().await?;

        Ok(Self {
            config: config.shop.server.clone(),
            state,
        })
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let mut server = ActixHttpServer::new(move || create_app(state.clone()));
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        let server = server
            .bind(&bind_addr)
            .map_err(|e| ShopError::config(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| ShopError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

fn build_cors(cors_config: &CorsConfig) -> Cors {
    if !cors_config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default().allow_any_method().allow_any_header();

    if cors_config.allows_all_origins() {
        cors = cors.allow_any_origin();
        cors_config.validate().unwrap_or_else(|e| {
            warn!(error = %e, "CORS Configuration Warning");
        });
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors = cors.max_age(cors_config.max_age as usize);

    if cors_config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}

/// Create the Actix-web application
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let server_config = state.config.server();
    let cors = build_cors(&server_config.cors);
    let json_config = web::JsonConfig::default()
        .limit(server_config.max_body_size)
        .error_handler(|err, _req| ShopError::bad_request(err.to_string()).into());
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| ShopError::bad_request(err.to_string()).into());
    let path_config = web::PathConfig::default()
        .error_handler(|err, _req| ShopError::bad_request(err.to_string()).into());

    App::new()
        .app_data(state)
        .app_data(json_config)
        .app_data(query_config)
        .app_data(path_config)
        .wrap(AuthMiddleware)
        .wrap(cors)
        .wrap(TracingLogger::default())
        .wrap(DefaultHeaders::new().add(("Server", "coffeeshop-rs")))
        .configure(routes::configure_routes)
        .default_service(web::route().to(routes::not_found))
}
