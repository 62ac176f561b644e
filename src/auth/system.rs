//! Account-backed authentication system

use super::jwt::{JwtHandler, TokenPair};
use super::rbac::{Authorizer, Role, RoleClaim, RoleRegistry};
use super::types::{AuthMethod, Identity, RegisterRequest};
use crate::config::AuthConfig;
use crate::core::models::{Account, Record};
use crate::storage::{DocumentStore, Repository};
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::error::{Result, ShopError};
use crate::utils::validation::DataValidator;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Main authentication system
#[derive(Debug, Clone)]
pub struct AuthSystem {
    /// Authentication configuration
    config: Arc<AuthConfig>,
    /// Account records
    accounts: Repository<Account>,
    /// JWT handler
    jwt: Arc<JwtHandler>,
    /// Authorization decisions
    authorizer: Authorizer,
    /// Role given to self-registered accounts
    default_role: Role,
}

impl AuthSystem {
    /// Create a new authentication system
    ///
    /// Fails when the configured role table is inconsistent.
    pub fn new(config: &AuthConfig, store: Arc<dyn DocumentStore>) -> Result<Self> {
        info!("Initializing authentication system");

        let registry = RoleRegistry::from_config(&config.rbac)?;
        let default_role = config.rbac.parsed_default_role().map_err(ShopError::config)?;

        info!(
            "Role registry ready with {} roles, default role {}",
            registry.roles().len(),
            default_role
        );

        Ok(Self {
            config: Arc::new(config.clone()),
            accounts: Repository::new(store),
            jwt: Arc::new(JwtHandler::new(config)),
            authorizer: Authorizer::new(Arc::new(registry)),
            default_role,
        })
    }

    pub fn jwt(&self) -> &JwtHandler {
        &self.jwt
    }

    pub fn authorizer(&self) -> &Authorizer {
        &self.authorizer
    }

    pub fn accounts(&self) -> &Repository<Account> {
        &self.accounts
    }

    /// Establish the identity behind a request
    ///
    /// `Ok(None)` means no credentials were presented.
    pub fn authenticate(&self, method: &AuthMethod) -> Result<Option<Identity>> {
        match method {
            AuthMethod::None => Ok(None),
            AuthMethod::Jwt(token) => {
                let claims = self.jwt.verify_token(token)?;
                let role = RoleClaim::parse(&claims.role);

                if role.role().is_none() {
                    warn!(
                        "Token for account {} carries unrecognized role {:?}",
                        claims.sub, claims.role
                    );
                }

                Ok(Some(Identity {
                    account_id: claims.sub,
                    username: claims.username,
                    role,
                }))
            }
        }
    }

    /// Create an account with the default role
    pub async fn register(&self, request: RegisterRequest) -> Result<Record<Account>> {
        DataValidator::validate_username(&request.username)?;
        DataValidator::validate_email(&request.email)?;
        DataValidator::validate_password(&request.password)?;

        let account = self
            .create_account(
                request.username,
                request.email,
                &request.password,
                self.default_role,
            )
            .await?;

        info!("Registered account: {}", account.data.username);
        Ok(account)
    }

    async fn create_account(
        &self,
        username: String,
        email: String,
        password: &str,
        role: Role,
    ) -> Result<Record<Account>> {
        let password_hash = hash_password(password)?;

        self.accounts
            .create(Account {
                username,
                email,
                password_hash,
                role,
                active: true,
            })
            .await
    }

    /// Verify credentials and issue a token pair
    pub async fn login(&self, username: &str, password: &str) -> Result<(Record<Account>, TokenPair)> {
        info!("Login attempt: {}", username);

        let account = self
            .accounts
            .find_by("username", username)
            .await?
            .ok_or_else(|| ShopError::auth("Invalid username or password"))?;

        if !verify_password(password, &account.data.password_hash)? {
            return Err(ShopError::auth("Invalid username or password"));
        }

        if !account.data.active {
            return Err(ShopError::auth("Account is not active"));
        }

        let tokens = self.issue_tokens(&account)?;
        info!("Logged in: {}", username);
        Ok((account, tokens))
    }

    fn issue_tokens(&self, account: &Record<Account>) -> Result<TokenPair> {
        self.jwt
            .create_token_pair(account.id, &account.data.username, account.data.role.as_str())
    }

    /// Exchange a refresh token for a new pair carrying the account's current role
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let claims = self.jwt.verify_refresh_token(refresh_token)?;

        let account = self
            .accounts
            .find(claims.sub)
            .await?
            .ok_or_else(|| ShopError::unauthorized("Account no longer exists"))?;

        if !account.data.active {
            return Err(ShopError::unauthorized("Account is not active"));
        }

        debug!("Refreshing tokens for account: {}", account.id);
        self.issue_tokens(&account)
    }

    /// Create the configured admin account if it does not exist yet
    pub async fn bootstrap_admin(&self) -> Result<Option<Record<Account>>> {
        let Some(admin) = &self.config.bootstrap_admin else {
            return Ok(None);
        };

        if self
            .accounts
            .find_by("username", admin.username.as_str())
            .await?
            .is_some()
        {
            debug!("Bootstrap admin {} already present", admin.username);
            return Ok(None);
        }

        let account = self
            .create_account(
                admin.username.clone(),
                admin.email.clone(),
                &admin.password,
                Role::Admin,
            )
            .await?;

        info!("Created bootstrap admin account: {}", account.data.username);
        Ok(Some(account))
    }

    /// Assign a new role; tokens issued earlier keep their old claim until they expire
    pub async fn change_role(&self, account_id: Uuid, role: Role) -> Result<Record<Account>> {
        let account = self
            .accounts
            .modify(account_id, move |account| {
                account.role = role;
                Ok(())
            })
            .await?;

        info!("Account {} now has role {}", account.data.username, role);
        Ok(account)
    }

    pub async fn set_active(&self, account_id: Uuid, active: bool) -> Result<Record<Account>> {
        let account = self
            .accounts
            .modify(account_id, move |account| {
                account.active = active;
                Ok(())
            })
            .await?;

        info!(
            "Account {} is now {}",
            account.data.username,
            if active { "active" } else { "disabled" }
        );
        Ok(account)
    }
}
