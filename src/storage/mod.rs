//! Storage layer for the backend
//!
//! Records are kept as JSON documents grouped by [`Collection`]. The
//! [`DocumentStore`] trait is the seam for a persistent database;
//! [`MemoryStore`] is the in-process implementation used by the server and tests.

mod document;
mod memory;
mod repository;


pub use document::{Document, DocumentBody, DocumentStore, ListQuery, Mutation, Page};
pub use memory::MemoryStore;
pub use repository::Repository;

pub use crate::core::models::Collection;
