//! Authentication middleware

use crate::auth::Identity;
use crate::server::middleware::helpers::extract_auth_method;
use crate::server::state::AppState;
use crate::utils::error::ShopError;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use futures::future::{Ready, ready};
use tracing::{debug, warn};

/// Attaches the [`Identity`] behind a valid bearer token to the request.
///
/// Requests without a token, or with one that fails verification, pass
/// through without an identity; [`super::RequireAccess`] turns that into 401
/// where a route needs one.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

/// Service implementation for auth middleware
pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let auth_method = extract_auth_method(req.headers());

        if let Some(state) = req.app_data::<web::Data<AppState>>() {
            match state.auth.authenticate(&auth_method) {
                Ok(Some(identity)) => {
                    debug!(
                        "Authenticated {} with role {}",
                        identity.username, identity.role
                    );
                    req.extensions_mut().insert(identity);
                }
                Ok(None) => {}
                Err(e) => warn!("Bearer token rejected: {}", e),
            }
        } else {
            warn!("Application state missing, request left unauthenticated");
        }

        self.service.call(req)
    }
}

/// Handlers take `Identity` as an argument to require an authenticated caller
impl FromRequest for Identity {
    type Error = ShopError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Identity>()
                .cloned()
                .ok_or_else(|| ShopError::unauthorized("Authentication required")),
        )
    }
}
