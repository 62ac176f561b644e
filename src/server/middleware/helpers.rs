//! Helper functions for middleware

use crate::auth::AuthMethod;
use crate::auth::jwt::JwtHandler;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};

/// Extract authentication method from headers
pub fn extract_auth_method(headers: &HeaderMap) -> AuthMethod {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(JwtHandler::extract_token_from_header)
        .map(|token| AuthMethod::Jwt(token.to_string()))
        .unwrap_or(AuthMethod::None)
}
