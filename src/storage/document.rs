//! Document store abstraction

use crate::core::models::Collection;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Top-level fields of a stored document
pub type DocumentBody = Map<String, Value>;

/// Read-modify-write step applied under the store's write lock
///
/// Returning an error aborts the write and leaves the document untouched.
pub type Mutation = Box<dyn FnOnce(&mut DocumentBody) -> Result<()> + Send>;

/// A stored document and its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Insertion order within the store
    #[serde(default)]
    pub sequence: u64,
    pub body: DocumentBody,
}

impl Document {
    /// Case-insensitive substring match over the given string fields
    pub fn matches(&self, needle: &str, fields: &[&str]) -> bool {
        let needle = needle.to_lowercase();
        fields.iter().any(|field| {
            self.body
                .get(*field)
                .and_then(Value::as_str)
                .is_some_and(|value| value.to_lowercase().contains(&needle))
        })
    }
}

/// Pagination and search parameters for listing a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Optional search text
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            search: None,
        }
    }

    pub fn with_search<S: Into<String>>(mut self, search: S) -> Self {
        let search = search.into();
        self.search = if search.trim().is_empty() {
            None
        } else {
            Some(search.trim().to_string())
        };
        self
    }

    pub(crate) fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.limit as usize
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(1, 20)
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Matching items across all pages
    pub total: usize,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            self.total.div_ceil(self.limit.max(1) as usize) as u32
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }

    pub fn try_map<U, E, F>(self, f: F) -> std::result::Result<Page<U>, E>
    where
        F: FnMut(T) -> std::result::Result<U, E>,
    {
        Ok(Page {
            items: self.items.into_iter().map(f).collect::<std::result::Result<_, _>>()?,
            total: self.total,
            page: self.page,
            limit: self.limit,
        })
    }
}

/// Persistence seam for collections of JSON documents
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Insert a new document; `unique` fields must not collide with existing documents
    async fn insert(
        &self,
        collection: Collection,
        body: DocumentBody,
        unique: &[&str],
    ) -> Result<Document>;

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<Document>>;

    /// Replace the body of an existing document
    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        body: DocumentBody,
        unique: &[&str],
    ) -> Result<Document>;

    /// Atomically apply `mutation` to an existing document
    async fn modify(
        &self,
        collection: Collection,
        id: Uuid,
        mutation: Mutation,
        unique: &[&str],
    ) -> Result<Document>;

    /// Returns whether a document was removed
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool>;

    /// Page through a collection in insertion order
    async fn list(
        &self,
        collection: Collection,
        query: &ListQuery,
        search_fields: &[&str],
    ) -> Result<Page<Document>>;

    /// First document whose `field` equals `value`
    async fn find_one(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Option<Document>>;

    async fn count(&self, collection: Collection) -> Result<usize>;
}
