//! Health check endpoint

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health status payload
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: DateTime<Utc>,
    pub version: Cow<'static, str>,
    /// Number of roles the registry knows
    pub roles: usize,
}

/// Basic health check endpoint, open to anyone
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        roles: state.auth.authorizer().registry().roles().len(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(health_status)))
}
