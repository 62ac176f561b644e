//! Test fixtures and data factories
//!
//! All factories create real objects, not mocks.

use actix_web::test::TestRequest;
use actix_web::{http::header::AUTHORIZATION, web};
use coffeeshop_rs::Config;
use coffeeshop_rs::config::BootstrapAdminConfig;
use coffeeshop_rs::server::AppState;
use coffeeshop_rs::storage::MemoryStore;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

pub const SECRET: &str = "Integration-Test-Secret-Key-Long-Enough-99!";
pub const ADMIN_USERNAME: &str = "owner";
pub const ADMIN_PASSWORD: &str = "Owner-Password-2026";

/// Application state over a fresh in-memory store
pub struct TestContext {
    pub state: web::Data<AppState>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Self::config())
    }

    pub fn config() -> Config {
        let mut config = Config::default();
        config.shop.auth.jwt_secret = SECRET.to_string();
        config.shop.auth.bootstrap_admin = Some(BootstrapAdminConfig {
            username: ADMIN_USERNAME.to_string(),
            email: "owner@coffee.test".to_string(),
            password: ADMIN_PASSWORD.to_string(),
        });
        config
    }

    pub fn with_config(config: Config) -> Self {
        let state = AppState::new(config, Arc::new(MemoryStore::new()))
            .expect("test configuration builds an app state");
        Self {
            state: web::Data::new(state),
        }
    }

    /// Create the configured admin account
    pub async fn bootstrap(&self) {
        self.state
            .auth
            .bootstrap_admin()
            .await
            .expect("bootstrap admin is created");
    }

    /// Bearer header value for a token carrying `role` as its claim
    pub fn bearer(&self, role: &str) -> String {
        let token = self
            .state
            .auth
            .jwt()
            .create_access_token(Uuid::new_v4(), &format!("{}-tester", role), role)
            .expect("token is signed");
        format!("Bearer {}", token)
    }

    pub fn get(&self, uri: &str, role: &str) -> TestRequest {
        TestRequest::get()
            .uri(uri)
            .insert_header((AUTHORIZATION, self.bearer(role)))
    }

    pub fn post(&self, uri: &str, role: &str, body: Value) -> TestRequest {
        TestRequest::post()
            .uri(uri)
            .insert_header((AUTHORIZATION, self.bearer(role)))
            .set_json(body)
    }

    pub fn put(&self, uri: &str, role: &str, body: Value) -> TestRequest {
        TestRequest::put()
            .uri(uri)
            .insert_header((AUTHORIZATION, self.bearer(role)))
            .set_json(body)
    }

    pub fn delete(&self, uri: &str, role: &str) -> TestRequest {
        TestRequest::delete()
            .uri(uri)
            .insert_header((AUTHORIZATION, self.bearer(role)))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Factory for product payloads
pub struct ProductFactory;

impl ProductFactory {
    pub fn create() -> Value {
        let suffix = &Uuid::new_v4().to_string()[..8];
        json!({
            "name": format!("Beans {}", suffix),
            "sku": format!("SKU-{}", suffix),
            "category": "beans",
            "unit_price_cents": 1299
        })
    }

    pub fn with_sku(sku: &str) -> Value {
        let mut product = Self::create();
        product["sku"] = json!(sku);
        product
    }
}
