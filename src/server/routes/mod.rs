//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.

pub mod accounts;
pub mod auth;
pub mod health;
pub mod resources;
pub mod roles;
pub mod sales;

use crate::config::StorageConfig;
use crate::storage::{ListQuery, Page};
use actix_web::{HttpRequest, HttpResponse, web};

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PaginationMeta {
    /// Current page number
    pub page: u32,
    /// Number of items per page
    pub limit: u32,
    /// Total number of items
    pub total: u64,
    /// Total number of pages
    pub pages: u32,
    /// Whether there is a next page
    pub has_next: bool,
    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let pages = total.div_ceil(u64::from(limit.max(1))) as u32;

        Self {
            page,
            limit,
            total,
            pages,
            has_next: page < pages,
            has_prev: page > 1,
        }
    }
}

/// Paginated response
#[derive(Debug, Clone, serde::Serialize)]
pub struct PaginatedResponse<T> {
    /// Response items
    pub items: Vec<T>,
    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl<T> From<Page<T>> for PaginatedResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            pagination: PaginationMeta::new(page.page, page.limit, page.total as u64),
            items: page.items,
        }
    }
}

/// Query parameters of list endpoints
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ListParams {
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Number of items per page
    pub limit: Option<u32>,
    /// Search text
    pub q: Option<String>,
}

impl ListParams {
    /// Validate and turn into a store query, applying the configured page sizes
    pub fn to_query(&self, storage: &StorageConfig) -> Result<ListQuery, String> {
        let page = self.page.unwrap_or(1);
        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        let limit = self.limit.unwrap_or(storage.default_page_size);
        if limit == 0 {
            return Err("Limit must be greater than 0".to_string());
        }
        if limit > storage.max_page_size {
            return Err(format!("Limit cannot exceed {}", storage.max_page_size));
        }

        let query = ListQuery::new(page, limit);
        Ok(match &self.q {
            Some(q) => query.with_search(q.as_str()),
            None => query,
        })
    }
}

/// Fallback for paths no scope matched
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error(format!(
        "No route for {} {}",
        req.method(),
        req.path()
    )))
}

/// Mount every route of the backend
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes)
        .configure(roles::configure_routes)
        .configure(accounts::configure_routes)
        .configure(resources::configure_routes)
        .configure(sales::configure_routes);
}
