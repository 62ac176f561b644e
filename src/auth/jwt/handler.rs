//! Core JWT handler implementation

use super::types::{Claims, JwtHandler, TokenPair, TokenType};
use crate::config::AuthConfig;
use crate::utils::error::{Result, ShopError};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use uuid::Uuid;

const ACCESS_AUDIENCE: &str = "api";
const REFRESH_AUDIENCE: &str = "refresh";

impl JwtHandler {
    /// Create a new JWT handler
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expiration: config.jwt_expiration,
            issuer: config.jwt_issuer.clone(),
        }
    }

    fn now() -> Result<u64> {
        Ok(SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| ShopError::internal(format!("System time error: {}", e)))?
            .as_secs())
    }

    fn sign(&self, claims: &Claims) -> Result<String> {
        let header = Header::new(self.algorithm);
        encode(&header, claims, &self.encoding_key).map_err(ShopError::Jwt)
    }

    /// Create an access token carrying the account's role claim
    pub fn create_access_token(&self, account_id: Uuid, username: &str, role: &str) -> Result<String> {
        let now = Self::now()?;

        let claims = Claims {
            sub: account_id,
            username: username.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + self.expiration,
            iss: self.issuer.clone(),
            aud: ACCESS_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
            token_type: TokenType::Access,
        };

        let token = self.sign(&claims)?;
        debug!("Created access token for account: {}", account_id);
        Ok(token)
    }

    /// Create a refresh token; it carries no role
    pub fn create_refresh_token(&self, account_id: Uuid, username: &str) -> Result<String> {
        let now = Self::now()?;

        let claims = Claims {
            sub: account_id,
            username: username.to_string(),
            role: String::new(),
            iat: now,
            exp: now + (self.expiration * 24), // Refresh tokens last 24x longer
            iss: self.issuer.clone(),
            aud: REFRESH_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
            token_type: TokenType::Refresh,
        };

        let token = self.sign(&claims)?;
        debug!("Created refresh token for account: {}", account_id);
        Ok(token)
    }

    /// Create a token pair (access + refresh)
    pub fn create_token_pair(&self, account_id: Uuid, username: &str, role: &str) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.create_access_token(account_id, username, role)?,
            refresh_token: self.create_refresh_token(account_id, username)?,
            token_type: "Bearer".to_string(),
            expires_in: self.expiration,
        })
    }

    fn decode_for(&self, token: &str, audience: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[audience]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            warn!("JWT verification failed: {}", e);
            ShopError::Jwt(e)
        })?;

        Ok(token_data.claims)
    }

    /// Verify and decode an access token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let claims = self.decode_for(token, ACCESS_AUDIENCE)?;

        if claims.token_type != TokenType::Access {
            return Err(ShopError::unauthorized("Invalid token type for access"));
        }

        debug!("Token verified for account: {}", claims.sub);
        Ok(claims)
    }

    /// Verify a refresh token and return its claims
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims> {
        let claims = self.decode_for(token, REFRESH_AUDIENCE)?;

        if claims.token_type != TokenType::Refresh {
            return Err(ShopError::unauthorized("Invalid token type for refresh"));
        }

        Ok(claims)
    }
}
