//! Authentication endpoints

use crate::auth::jwt::TokenPair;
use crate::auth::rbac::{AccessRequirement, Permission, Role, RoleClaim};
use crate::auth::{Identity, LoginRequest, RefreshRequest, RegisterRequest};
use crate::core::models::{AccountView, Record};
use crate::server::middleware::RequireAccess;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// Configure authentication routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/refresh", web::post().to(refresh))
            .service(
                web::resource("/me")
                    .wrap(RequireAccess::new(AccessRequirement::Authenticated))
                    .route(web::get().to(me)),
            ),
    );
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub account: Record<AccountView>,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

/// The caller as seen by the authorizer
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub account_id: Uuid,
    pub username: String,
    /// Role claim as carried in the token
    pub role: String,
    /// Parsed role, absent when the claim is not a known role
    pub recognized_role: Option<Role>,
    pub is_manager: bool,
    pub permissions: Vec<Permission>,
}

/// Self-registration; new accounts get the default role
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    let account = state.auth.register(request.into_inner()).await?;
    info!("Account registered: {}", account.id);

    Ok(HttpResponse::Created().json(ApiResponse::success(account.map(AccountView::from))))
}

pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    let (account, tokens) = state
        .auth
        .login(&request.username, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(LoginResponse {
        account: account.map(AccountView::from),
        tokens,
    })))
}

pub async fn refresh(
    state: web::Data<AppState>,
    request: web::Json<RefreshRequest>,
) -> ActixResult<HttpResponse> {
    let tokens = state.auth.refresh(&request.refresh_token).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(tokens)))
}

pub async fn me(state: web::Data<AppState>, identity: Identity) -> ActixResult<HttpResponse> {
    let authorizer = state.auth.authorizer();

    let response = MeResponse {
        account_id: identity.account_id,
        username: identity.username.clone(),
        role: match &identity.role {
            RoleClaim::Valid(role) => role.to_string(),
            RoleClaim::Invalid(raw) => raw.clone(),
        },
        recognized_role: identity.role.role(),
        is_manager: authorizer.is_manager_role(&identity.role),
        permissions: authorizer.effective_permissions(&identity.role),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}
