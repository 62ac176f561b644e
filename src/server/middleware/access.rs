//! Per-scope access rules

use crate::auth::Identity;
use crate::auth::rbac::AccessRequirement;
use crate::server::state::AppState;
use crate::utils::error::ShopError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::Method;
use actix_web::{HttpMessage, web};
use futures::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, warn};

/// Which requirement guards which HTTP method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule {
    /// GET, HEAD and OPTIONS
    pub read: AccessRequirement,
    /// PUT, PATCH and DELETE, and POST unless `create` is set
    pub write: AccessRequirement,
    pub create: Option<AccessRequirement>,
}

impl AccessRule {
    pub fn requirement_for(&self, method: &Method) -> &AccessRequirement {
        match *method {
            Method::GET | Method::HEAD | Method::OPTIONS => &self.read,
            Method::POST => self.create.as_ref().unwrap_or(&self.write),
            _ => &self.write,
        }
    }
}

/// Rejects requests whose identity does not meet the scope's rule.
///
/// No identity gives 401; an identity the authorizer denies gives 403.
#[derive(Debug, Clone)]
pub struct RequireAccess {
    rule: Rc<AccessRule>,
}

impl RequireAccess {
    /// Same requirement for every method
    pub fn new(requirement: AccessRequirement) -> Self {
        Self::read_write(requirement.clone(), requirement)
    }

    pub fn read_write(read: AccessRequirement, write: AccessRequirement) -> Self {
        Self {
            rule: Rc::new(AccessRule {
                read,
                write,
                create: None,
            }),
        }
    }

    /// Separate requirement for POST
    pub fn on_create(self, create: AccessRequirement) -> Self {
        let mut rule = (*self.rule).clone();
        rule.create = Some(create);
        Self {
            rule: Rc::new(rule),
        }
    }

    pub fn rule(&self) -> &AccessRule {
        &self.rule
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAccess
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequireAccessService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAccessService {
            service,
            rule: Rc::clone(&self.rule),
        }))
    }
}

/// Service implementation for access rules
pub struct RequireAccessService<S> {
    service: S,
    rule: Rc<AccessRule>,
}

impl<S> RequireAccessService<S> {
    fn authorize(&self, req: &ServiceRequest) -> Result<(), ShopError> {
        let requirement = self.rule.requirement_for(req.method());

        let identity = req
            .extensions()
            .get::<Identity>()
            .cloned()
            .ok_or_else(|| ShopError::unauthorized("Authentication required"))?;

        let state = req
            .app_data::<web::Data<AppState>>()
            .ok_or_else(|| ShopError::internal("Application state missing"))?;

        let check = state.auth.authorizer().check(&identity.role, requirement);
        if check.granted {
            return Ok(());
        }

        let reason = check
            .denial_reason
            .unwrap_or_else(|| format!("Missing {}", requirement));
        warn!(
            "Denied {} {} for {}: {}",
            req.method(),
            req.path(),
            identity.username,
            reason
        );
        Err(ShopError::forbidden(reason))
    }
}

impl<S, B> Service<ServiceRequest> for RequireAccessService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match self.authorize(&req) {
            Ok(()) => {
                debug!("Access granted for {} {}", req.method(), req.path());
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(e) => {
                let response = req.error_response(e).map_into_right_body();
                Box::pin(ready(Ok(response)))
            }
        }
    }
}
