//! In-process document store

use super::document::{Document, DocumentBody, DocumentStore, ListQuery, Mutation, Page};
use crate::core::models::Collection;
use crate::utils::error::{Result, ShopError};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;
use uuid::Uuid;

/// Document store held in memory
///
/// Each collection sits behind one DashMap shard lock, so uniqueness checks
/// and read-modify-write steps observe a consistent collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<Collection, BTreeMap<Uuid, Document>>,
    sequence: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Reject `body` if a document other than `skip` already holds one of its unique values
fn check_unique(
    collection: Collection,
    documents: &BTreeMap<Uuid, Document>,
    body: &DocumentBody,
    unique: &[&str],
    skip: Option<Uuid>,
) -> Result<()> {
    for field in unique {
        let value = match body.get(*field) {
            Some(Value::Null) | None => continue,
            Some(value) => value,
        };

        let taken = documents
            .values()
            .filter(|doc| Some(doc.id) != skip)
            .any(|doc| doc.body.get(*field) == Some(value));

        if taken {
            return Err(ShopError::conflict(format!(
                "{} with this {} already exists",
                collection, field
            )));
        }
    }
    Ok(())
}

fn missing(collection: Collection, id: Uuid) -> ShopError {
    ShopError::not_found(format!("No {} record with id {}", collection, id))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(
        &self,
        collection: Collection,
        body: DocumentBody,
        unique: &[&str],
    ) -> Result<Document> {
        let mut documents = self.collections.entry(collection).or_default();
        check_unique(collection, &documents, &body, unique, None)?;

        let now = Utc::now();
        let document = Document {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed),
            body,
        };
        documents.insert(document.id, document.clone());

        debug!("Inserted {} into {}", document.id, collection);
        Ok(document)
    }

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<Document>> {
        Ok(self
            .collections
            .get(&collection)
            .and_then(|documents| documents.get(&id).cloned()))
    }

    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        body: DocumentBody,
        unique: &[&str],
    ) -> Result<Document> {
        let mut documents = self.collections.entry(collection).or_default();
        if !documents.contains_key(&id) {
            return Err(missing(collection, id));
        }
        check_unique(collection, &documents, &body, unique, Some(id))?;

        let document = documents.get_mut(&id).ok_or_else(|| missing(collection, id))?;
        document.body = body;
        document.updated_at = Utc::now();

        debug!("Replaced {} in {}", id, collection);
        Ok(document.clone())
    }

    async fn modify(
        &self,
        collection: Collection,
        id: Uuid,
        mutation: Mutation,
        unique: &[&str],
    ) -> Result<Document> {
        let mut documents = self.collections.entry(collection).or_default();
        let mut body = documents
            .get(&id)
            .map(|doc| doc.body.clone())
            .ok_or_else(|| missing(collection, id))?;

        mutation(&mut body)?;
        check_unique(collection, &documents, &body, unique, Some(id))?;

        let document = documents.get_mut(&id).ok_or_else(|| missing(collection, id))?;
        document.body = body;
        document.updated_at = Utc::now();

        debug!("Modified {} in {}", id, collection);
        Ok(document.clone())
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool> {
        let removed = self
            .collections
            .get_mut(&collection)
            .and_then(|mut documents| documents.remove(&id))
            .is_some();

        if removed {
            debug!("Deleted {} from {}", id, collection);
        }
        Ok(removed)
    }

    async fn list(
        &self,
        collection: Collection,
        query: &ListQuery,
        search_fields: &[&str],
    ) -> Result<Page<Document>> {
        let mut matching: Vec<Document> = match self.collections.get(&collection) {
            Some(documents) => documents
                .values()
                .filter(|doc| match &query.search {
                    Some(needle) => doc.matches(needle, search_fields),
                    None => true,
                })
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        matching.sort_by_key(|doc| doc.sequence);

        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(query.offset())
            .take(query.limit as usize)
            .collect();

        Ok(Page {
            items,
            total,
            page: query.page,
            limit: query.limit,
        })
    }

    async fn find_one(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Option<Document>> {
        Ok(self.collections.get(&collection).and_then(|documents| {
            documents
                .values()
                .find(|doc| doc.body.get(field) == Some(value))
                .cloned()
        }))
    }

    async fn count(&self, collection: Collection) -> Result<usize> {
        Ok(self
            .collections
            .get(&collection)
            .map(|documents| documents.len())
            .unwrap_or(0))
    }
}
