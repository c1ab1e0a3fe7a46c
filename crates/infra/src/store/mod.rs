//! Persistence collaborator: named collections of JSON documents.
//!
//! Stores give no atomicity or isolation guarantees. A `save` replaces the
//! whole collection, so concurrent writers are last-write-wins.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value as JsonValue;
use thiserror::Error;

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryDocumentStore;
pub use json_file::JsonFileStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid collection name: {0:?}")]
    InvalidCollection(String),

    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Load/save whole collections of documents.
///
/// A collection that was never saved loads as empty.
pub trait DocumentStore: Send + Sync {
    fn load(&self, collection: &str) -> Result<Vec<JsonValue>, StoreError>;
    fn save(&self, collection: &str, records: &[JsonValue]) -> Result<(), StoreError>;
}

impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    fn load(&self, collection: &str) -> Result<Vec<JsonValue>, StoreError> {
        (**self).load(collection)
    }

    fn save(&self, collection: &str, records: &[JsonValue]) -> Result<(), StoreError> {
        (**self).save(collection, records)
    }
}

/// Collection names double as file names, so keep them to `[A-Za-z0-9_-]`.
pub(crate) fn validate_collection(collection: &str) -> Result<(), StoreError> {
    let ok = !collection.is_empty()
        && collection
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection(collection.to_string()))
    }
}
