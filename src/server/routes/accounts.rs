//! Account management; requires `ManageAccounts`

use super::resources::list_query;
use crate::auth::rbac::{AccessRequirement, Permission, Role};
use crate::auth::{Identity, RoleChange};
use crate::core::models::AccountView;
use crate::server::middleware::RequireAccess;
use crate::server::routes::{ApiResponse, ListParams, PaginatedResponse};
use crate::server::state::AppState;
use crate::utils::error::ShopError;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

/// Configure account routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/accounts")
            .wrap(RequireAccess::new(AccessRequirement::Permission(
                Permission::ManageAccounts,
            )))
            .route("", web::get().to(list_accounts))
            .route("/{id}", web::get().to(get_account))
            .route("/{id}", web::delete().to(delete_account))
            .route("/{id}/role", web::put().to(change_role))
            .route("/{id}/active", web::put().to(set_active)),
    );
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActiveChange {
    pub active: bool,
}

pub async fn list_accounts(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    let query = list_query(&state, &params)?;

    let page = state
        .auth
        .accounts()
        .list(&query)
        .await?
        .map(|account| account.map(AccountView::from));

    Ok(HttpResponse::Ok().json(ApiResponse::success(PaginatedResponse::from(page))))
}

pub async fn get_account(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let account = state.auth.accounts().get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(account.map(AccountView::from))))
}

pub async fn change_role(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<RoleChange>,
) -> ActixResult<HttpResponse> {
    let role: Role = body
        .role
        .parse()
        .map_err(ShopError::validation)?;

    let account = state.auth.change_role(path.into_inner(), role).await?;
    info!(
        "{} changed role of {} to {}",
        identity.username, account.data.username, role
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(account.map(AccountView::from))))
}

pub async fn set_active(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<ActiveChange>,
) -> ActixResult<HttpResponse> {
    let account_id = path.into_inner();
    if account_id == identity.account_id && !body.active {
        return Err(ShopError::bad_request("Cannot disable your own account").into());
    }

    let account = state.auth.set_active(account_id, body.active).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(account.map(AccountView::from))))
}

pub async fn delete_account(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let account_id = path.into_inner();
    if account_id == identity.account_id {
        return Err(ShopError::bad_request("Cannot delete your own account").into());
    }

    state.auth.accounts().delete(account_id).await?;
    info!("{} deleted account {}", identity.username, account_id);

    Ok(HttpResponse::NoContent().finish())
}
