//! Sales endpoints
//!
//! Staff and customers with `PlaceOrders` record sales; reading them needs
//! `ViewFinancials`, correcting or removing them `ManageSales`.

use super::resources::{delete, read_routes, update};
use crate::auth::Identity;
use crate::auth::rbac::{AccessRequirement, Permission};
use crate::core::models::Sale;
use crate::server::middleware::RequireAccess;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::services::SaleRequest;
use actix_web::{HttpResponse, Result as ActixResult, web};
use chrono::Utc;

/// Configure sales routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        read_routes::<Sale>(web::scope("/sales"))
            .route("", web::post().to(record_sale))
            .route("/{id}", web::put().to(update::<Sale>))
            .route("/{id}", web::delete().to(delete::<Sale>))
            .wrap(
                RequireAccess::read_write(
                    AccessRequirement::Permission(Permission::ViewFinancials),
                    AccessRequirement::Permission(Permission::ManageSales),
                )
                .on_create(AccessRequirement::Permission(Permission::PlaceOrders)),
            ),
    );
}

pub async fn record_sale(
    state: web::Data<AppState>,
    identity: Identity,
    request: web::Json<SaleRequest>,
) -> ActixResult<HttpResponse> {
    let sale = state
        .sales
        .record_sale(
            request.into_inner(),
            Some(identity.account_id),
            Utc::now().date_naive(),
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(sale)))
}
