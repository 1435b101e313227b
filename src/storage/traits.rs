//! Abstract store trait for junction duplicate detection.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::RecordId;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend failure (query engine error, poisoned lock, connection loss).
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// One group from the duplicate-count query: a parent pair and how many
/// stored junction records link it.
///
/// Only these three fields are consumed by callers, so the result is a
/// concrete struct rather than a generic aggregate row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedCount {
    /// Value of the first grouping field, in grouping key order.
    pub value_a: RecordId,
    /// Value of the second grouping field.
    pub value_b: RecordId,
    /// Number of stored records in the group; always > 1.
    pub count: u64,
}

/// Read contract against the durable store.
///
/// Implementations must honor `IN`-predicate and `GROUP BY ... HAVING
/// count > 1` semantics: the query sees every durably stored record of
/// `object_type`, including records outside the caller's working set that
/// happen to share both parent ids.
pub trait JunctionStore: Send + Sync {
    /// Counts stored records of `object_type` grouped by the pair
    /// `(field_a, field_b)`, restricted to rows where `field_a` is in
    /// `ids_a` and `field_b` is in `ids_b`, returning only groups whose
    /// count exceeds 1. Grouping key order is fixed as (A, B) as passed.
    ///
    /// # Errors
    /// [`StorageError::Backend`] if the query cannot be executed. The
    /// query runs at most once per call; a failure means no results.
    fn query_grouped_counts(
        &self,
        object_type: &str,
        field_a: &str,
        field_b: &str,
        ids_a: &HashSet<RecordId>,
        ids_b: &HashSet<RecordId>,
    ) -> Result<Vec<GroupedCount>, StorageError>;
}
