//! Domain events.
//!
//! Mutating inventory operations describe what happened as an event value.
//! Events are returned to the caller; nothing in this workspace stores them.

pub mod event;

pub use event::Event;
