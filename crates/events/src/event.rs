use chrono::{DateTime, Utc};

use mise_core::EntityId;

/// A domain-agnostic event.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **versioned** (schema evolution)
/// - about exactly one entity
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "inventory.stock.received").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// The entity this event is about.
    fn entity_id(&self) -> EntityId;

    /// When the event occurred (business time, supplied by the caller).
    fn occurred_at(&self) -> DateTime<Utc>;
}
