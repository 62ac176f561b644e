//! Typed access to one collection

use super::document::{Document, DocumentBody, DocumentStore, ListQuery, Mutation, Page};
use crate::core::models::{Record, Resource};
use crate::utils::error::{Result, ShopError};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

/// Typed view over the collection of `T`
#[derive(Debug)]
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _resource: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _resource: PhantomData,
        }
    }
}

fn encode<T: Resource>(data: &T) -> Result<DocumentBody> {
    match serde_json::to_value(data)? {
        Value::Object(body) => Ok(body),
        _ => Err(ShopError::internal(format!(
            "{} records must serialize to a JSON object",
            T::COLLECTION
        ))),
    }
}

fn decode<T: Resource>(document: Document) -> Result<Record<T>> {
    let data = serde_json::from_value(Value::Object(document.body))?;
    Ok(Record {
        id: document.id,
        created_at: document.created_at,
        updated_at: document.updated_at,
        data,
    })
}

impl<T: Resource> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _resource: PhantomData,
        }
    }

    pub async fn create(&self, data: T) -> Result<Record<T>> {
        data.validate()?;
        let document = self
            .store
            .insert(T::COLLECTION, encode(&data)?, T::UNIQUE_FIELDS)
            .await?;
        decode(document)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Record<T>>> {
        self.store
            .get(T::COLLECTION, id)
            .await?
            .map(decode)
            .transpose()
    }

    /// Like [`Repository::find`] but a missing record is `NotFound`
    pub async fn get(&self, id: Uuid) -> Result<Record<T>> {
        self.find(id).await?.ok_or_else(|| {
            ShopError::not_found(format!("No {} record with id {}", T::COLLECTION, id))
        })
    }

    pub async fn update(&self, id: Uuid, data: T) -> Result<Record<T>> {
        data.validate()?;
        let document = self
            .store
            .replace(T::COLLECTION, id, encode(&data)?, T::UNIQUE_FIELDS)
            .await?;
        decode(document)
    }

    /// Atomically rewrite a record; an error from `change` leaves it untouched
    pub async fn modify<F>(&self, id: Uuid, change: F) -> Result<Record<T>>
    where
        F: FnOnce(&mut T) -> Result<()> + Send + 'static,
    {
        let mutation: Mutation = Box::new(move |body: &mut DocumentBody| -> Result<()> {
            let mut data: T = serde_json::from_value(Value::Object(body.clone()))?;
            change(&mut data)?;
            data.validate()?;
            *body = encode(&data)?;
            Ok(())
        });

        let document = self
            .store
            .modify(T::COLLECTION, id, mutation, T::UNIQUE_FIELDS)
            .await?;
        decode(document)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if self.store.delete(T::COLLECTION, id).await? {
            Ok(())
        } else {
            Err(ShopError::not_found(format!(
                "No {} record with id {}",
                T::COLLECTION,
                id
            )))
        }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<Record<T>>> {
        self.store
            .list(T::COLLECTION, query, T::SEARCH_FIELDS)
            .await?
            .try_map(decode)
    }

    pub async fn find_by<V: Into<Value>>(&self, field: &str, value: V) -> Result<Option<Record<T>>> {
        self.store
            .find_one(T::COLLECTION, field, &value.into())
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn count(&self) -> Result<usize> {
        self.store.count(T::COLLECTION).await
    }
}
