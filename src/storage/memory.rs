//! In-memory storage backend.
//!
//! A thread-safe implementation of [`JunctionStore`] over an owned record
//! collection. Intended for embedded usage, tests, and as a reference for
//! the grouped-query contract.

use std::collections::{BTreeMap, HashSet};
use std::sync::RwLock;

use crate::record::{Record, RecordId};
use crate::storage::traits::{GroupedCount, JunctionStore, StorageError};
use crate::value::FieldValue;

fn lock_err(context: &'static str) -> StorageError {
    StorageError::Backend(format!("poisoned lock: {context}"))
}

/// In-memory durable store holding committed junction records.
///
/// # Examples
///
/// ```
/// use recordset::{FieldValue, MemoryJunctionStore, Record, RecordId};
///
/// let store = MemoryJunctionStore::new();
/// store.insert(
///     Record::new("Junction__c", RecordId::new("j01"))
///         .with_field("A__c", FieldValue::Id(RecordId::new("x")))
///         .with_field("B__c", FieldValue::Id(RecordId::new("y"))),
/// );
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryJunctionStore {
    records: RwLock<Vec<Record>>,
}

impl MemoryJunctionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits a record to the store.
    ///
    /// # Panics
    /// Panics if the interior lock is poisoned.
    pub fn insert(&self, record: Record) {
        self.records
            .write()
            .expect("junction store lock poisoned")
            .push(record);
    }

    /// Number of committed records.
    ///
    /// # Panics
    /// Panics if the interior lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records
            .read()
            .expect("junction store lock poisoned")
            .len()
    }

    /// Returns true if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all committed records.
    ///
    /// # Panics
    /// Panics if the interior lock is poisoned.
    pub fn clear(&self) {
        self.records
            .write()
            .expect("junction store lock poisoned")
            .clear();
    }
}

/// Reads a grouping field as an id. Rows whose field is missing, null, or
/// not id-shaped do not match an `IN` predicate, mirroring query-engine
/// null semantics.
fn grouping_value(record: &Record, field: &str) -> Option<RecordId> {
    match record.get(field)? {
        FieldValue::Id(id) => Some(id.clone()),
        FieldValue::String(s) => RecordId::parse(s).ok(),
        _ => None,
    }
}

impl JunctionStore for MemoryJunctionStore {
    fn query_grouped_counts(
        &self,
        object_type: &str,
        field_a: &str,
        field_b: &str,
        ids_a: &HashSet<RecordId>,
        ids_b: &HashSet<RecordId>,
    ) -> Result<Vec<GroupedCount>, StorageError> {
        let records = self.records.read().map_err(|_| lock_err("query"))?;

        // BTreeMap keeps result order deterministic across runs.
        let mut groups: BTreeMap<(RecordId, RecordId), u64> = BTreeMap::new();
        for record in records.iter() {
            if record.object_type != object_type {
                continue;
            }
            let Some(a) = grouping_value(record, field_a) else {
                continue;
            };
            let Some(b) = grouping_value(record, field_b) else {
                continue;
            };
            if ids_a.contains(&a) && ids_b.contains(&b) {
                *groups.entry((a, b)).or_insert(0) += 1;
            }
        }

        Ok(groups
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .map(|((value_a, value_b), count)| GroupedCount {
                value_a,
                value_b,
                count,
            })
            .collect())
    }
}
