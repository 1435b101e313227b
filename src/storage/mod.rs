//! Storage contract for the grouped duplicate-count query.
//!
//! The durable store is the only external collaborator this crate touches.
//! Modeling it as a trait lets tests and embedded callers substitute the
//! in-memory backend for a real query engine.

mod memory;
mod traits;

pub use memory::MemoryJunctionStore;
pub use traits::{GroupedCount, JunctionStore, StorageError};
