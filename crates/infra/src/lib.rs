//! Infrastructure layer: document stores, configuration and the inventory
//! service that drives the engine against them.

pub mod config;
pub mod service;
pub mod store;

pub use config::{InfraConfig, LoadedConfig};
pub use service::{INVENTORY_COLLECTION, InventoryService, ServiceError, ServiceResult};
pub use store::{DocumentStore, InMemoryDocumentStore, JsonFileStore, StoreError};
