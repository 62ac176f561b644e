//! Common test utilities for coffeeshop-rs
//!
//! ```rust,ignore
//! use crate::common::{TestContext, send};
//!
//! #[actix_web::test]
//! async fn my_test() {
//!     let ctx = TestContext::new();
//!     let app = crate::init_app!(ctx);
//!     let (status, body) = send(&app, ctx.get("/products", "Customer").to_request()).await;
//! }
//! ```

pub mod fixtures;
pub mod http;

pub use fixtures::{ProductFactory, TestContext};
pub use http::send;

/// Initialize the full application for a [`TestContext`]
#[macro_export]
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(coffeeshop_rs::server::create_app($ctx.state.clone())).await
    };
}
