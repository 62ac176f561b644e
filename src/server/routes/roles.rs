//! Role registry introspection

use crate::auth::rbac::{AccessRequirement, Permission, Role};
use crate::server::middleware::RequireAccess;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::ShopError;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;

/// Configure role routes; managers only
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/roles")
            .wrap(RequireAccess::new(AccessRequirement::Manager))
            .route("", web::get().to(list_roles))
            .route("/{role}", web::get().to(get_role)),
    );
}

/// One registry entry
#[derive(Debug, Clone, Serialize)]
pub struct RoleSummary {
    pub role: Role,
    pub is_manager: bool,
    pub grants_all: bool,
    pub inherits_from: Vec<Role>,
    pub direct_permissions: Vec<Permission>,
    /// Direct plus inherited; every permission for wildcard roles
    pub effective_permissions: Vec<Permission>,
}

fn summarize(state: &AppState, role: Role) -> Option<RoleSummary> {
    let authorizer = state.auth.authorizer();
    let definition = authorizer.registry().definition(role)?;

    let mut direct_permissions: Vec<_> = definition.direct_permissions.iter().copied().collect();
    direct_permissions.sort();

    Some(RoleSummary {
        role,
        is_manager: definition.is_manager,
        grants_all: definition.grants_all,
        inherits_from: definition.inherits_from.clone(),
        direct_permissions,
        effective_permissions: authorizer.effective_permissions(&role.into()),
    })
}

pub async fn list_roles(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let roles: Vec<_> = state
        .auth
        .authorizer()
        .registry()
        .roles()
        .into_iter()
        .filter_map(|(role, _)| summarize(&state, role))
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(roles)))
}

pub async fn get_role(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let name = path.into_inner();
    let role: Role = name
        .parse()
        .map_err(|_| ShopError::not_found(format!("Unknown role {}", name)))?;

    let summary = summarize(&state, role)
        .ok_or_else(|| ShopError::not_found(format!("Role {} is not defined", role)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(summary)))
}
