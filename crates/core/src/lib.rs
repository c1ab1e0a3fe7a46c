//! `mise-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage, no logging).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::DomainError;
pub use id::EntityId;
