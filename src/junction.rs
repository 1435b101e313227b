//! Duplicate-junction detection.
//!
//! A junction record links exactly two parent entities through two
//! designated fields. At most one junction may link a given parent pair;
//! this module finds violations across the durable store plus the records
//! in the current operation, and annotates the offending records rather
//! than rejecting them itself.

use std::collections::HashSet;

use crate::error::{RecordError, RecordResult};
use crate::extract::extract_ids_from;
use crate::record::{FieldRef, Record};
use crate::storage::JunctionStore;

/// Message attached to each record that duplicates an existing parent pair.
pub const DUPLICATE_JUNCTION_MESSAGE: &str = "parents are already linked by an existing record";

/// Flags junction records in `records` whose parent pair is linked by more
/// than one stored record.
///
/// Intended call sites: after records are durably committed as new or
/// undeleted (so the grouped query sees them), or after an update that can
/// re-target a junction's parents. The check runs one grouped query against
/// `store` and then annotates each offending input record with
/// [`DUPLICATE_JUNCTION_MESSAGE`]; it never modifies field values or
/// removes records. Halting persistence based on annotations is the
/// caller's responsibility.
///
/// Pair keys are built by concatenating the two parent id values in the
/// order the fields were passed, with no delimiter. Ids with ambiguous
/// boundaries ("AB"+"C" vs "A"+"BC") can therefore collide; this matches
/// the platform behavior the check replicates. Swapping the two field
/// arguments flags the same records as long as both the query grouping and
/// the per-record keys use the same call order, which this function
/// guarantees within one invocation.
///
/// An empty `records` batch returns immediately without querying.
///
/// # Errors
/// - cast errors if a record's parent field is missing or not id-shaped
/// - [`RecordError::MixedObjectTypes`] if the batch spans object types
/// - storage errors from the grouped query, in which case no annotations
///   are applied (the query runs once, before any annotation)
pub fn check_junction_uniqueness(
    store: &dyn JunctionStore,
    records: &mut [Record],
    parent_field_a: impl Into<FieldRef>,
    parent_field_b: impl Into<FieldRef>,
) -> RecordResult<()> {
    let Some(first) = records.first() else {
        return Ok(());
    };
    let object_type = first.object_type.clone();
    for record in records.iter() {
        if record.object_type != object_type {
            return Err(RecordError::MixedObjectTypes {
                expected: object_type.clone(),
                actual: record.object_type.clone(),
            });
        }
    }

    let field_a = parent_field_a.into();
    let field_b = parent_field_b.into();

    let ids_a = extract_ids_from(records, field_a.clone())?;
    let ids_b = extract_ids_from(records, field_b.clone())?;

    let groups = store.query_grouped_counts(
        &object_type,
        field_a.name(),
        field_b.name(),
        &ids_a,
        &ids_b,
    )?;

    let offending: HashSet<String> = groups
        .iter()
        .map(|g| format!("{}{}", g.value_a, g.value_b))
        .collect();
    if offending.is_empty() {
        return Ok(());
    }

    for record in records.iter_mut() {
        let a = record.read_id(field_a.clone())?;
        let b = record.read_id(field_b.clone())?;
        let key = format!("{a}{b}");
        if offending.contains(&key) {
            record.add_error(DUPLICATE_JUNCTION_MESSAGE);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordId;
    use crate::storage::{GroupedCount, MemoryJunctionStore, StorageError};
    use crate::value::FieldValue;

    fn junction(id: &str, a: &str, b: &str) -> Record {
        Record::new("Junction__c", RecordId::new(id))
            .with_field("A__c", FieldValue::Id(RecordId::new(a)))
            .with_field("B__c", FieldValue::Id(RecordId::new(b)))
    }

    /// Store fake that fails every query, to prove the empty-batch skip
    /// and the all-or-nothing failure contract.
    struct FailingStore;

    impl JunctionStore for FailingStore {
        fn query_grouped_counts(
            &self,
            _object_type: &str,
            _field_a: &str,
            _field_b: &str,
            _ids_a: &std::collections::HashSet<RecordId>,
            _ids_b: &std::collections::HashSet<RecordId>,
        ) -> Result<Vec<GroupedCount>, StorageError> {
            Err(StorageError::Backend("simulated query failure".to_string()))
        }
    }

    #[test]
    fn test_duplicate_pair_flags_exactly_its_records() {
        let store = MemoryJunctionStore::new();
        // A, B, C are already committed; A and B both link (x, y).
        store.insert(junction("jA", "x", "y"));
        store.insert(junction("jB", "x", "y"));
        store.insert(junction("jC", "x", "z"));

        let mut batch = vec![
            junction("jA", "x", "y"),
            junction("jB", "x", "y"),
            junction("jC", "x", "z"),
        ];
        check_junction_uniqueness(&store, &mut batch, "A__c", "B__c").unwrap();

        assert_eq!(batch[0].errors(), [DUPLICATE_JUNCTION_MESSAGE]);
        assert_eq!(batch[1].errors(), [DUPLICATE_JUNCTION_MESSAGE]);
        assert!(!batch[2].has_errors());
    }

    #[test]
    fn test_duplicate_outside_batch_flags_batch_record() {
        let store = MemoryJunctionStore::new();
        // An older record already links (x, y); only the new one is in the batch.
        store.insert(junction("jOld", "x", "y"));
        store.insert(junction("jNew", "x", "y"));

        let mut batch = vec![junction("jNew", "x", "y")];
        check_junction_uniqueness(&store, &mut batch, "A__c", "B__c").unwrap();

        assert!(batch[0].has_errors());
    }

    #[test]
    fn test_unique_pairs_get_no_annotation() {
        let store = MemoryJunctionStore::new();
        store.insert(junction("j1", "x", "y"));
        store.insert(junction("j2", "x", "z"));

        let mut batch = vec![junction("j1", "x", "y"), junction("j2", "x", "z")];
        check_junction_uniqueness(&store, &mut batch, "A__c", "B__c").unwrap();

        assert!(batch.iter().all(|r| !r.has_errors()));
    }

    #[test]
    fn test_swapped_field_arguments_flag_same_records() {
        let store = MemoryJunctionStore::new();
        store.insert(junction("jA", "x", "y"));
        store.insert(junction("jB", "x", "y"));

        let mut batch = vec![junction("jA", "x", "y"), junction("jB", "x", "y")];
        check_junction_uniqueness(&store, &mut batch, "B__c", "A__c").unwrap();

        assert!(batch[0].has_errors());
        assert!(batch[1].has_errors());
    }

    #[test]
    fn test_empty_batch_skips_query() {
        // FailingStore errors on any query; an empty batch must not reach it.
        let mut batch: Vec<Record> = Vec::new();
        check_junction_uniqueness(&FailingStore, &mut batch, "A__c", "B__c").unwrap();
    }

    #[test]
    fn test_query_failure_applies_no_annotations() {
        let mut batch = vec![junction("jA", "x", "y"), junction("jB", "x", "y")];
        let err = check_junction_uniqueness(&FailingStore, &mut batch, "A__c", "B__c").unwrap_err();

        assert!(err.is_storage());
        assert!(batch.iter().all(|r| !r.has_errors()));
    }

    #[test]
    fn test_mixed_object_types_rejected() {
        let store = MemoryJunctionStore::new();
        let mut batch = vec![
            junction("j1", "x", "y"),
            Record::new("Other__c", RecordId::new("o1"))
                .with_field("A__c", FieldValue::Id(RecordId::new("x")))
                .with_field("B__c", FieldValue::Id(RecordId::new("y"))),
        ];
        let err = check_junction_uniqueness(&store, &mut batch, "A__c", "B__c").unwrap_err();
        assert!(err.to_string().contains("Mixed object types"));
    }

    #[test]
    fn test_missing_parent_field_is_fatal() {
        let store = MemoryJunctionStore::new();
        let mut batch = vec![Record::new("Junction__c", RecordId::new("j1"))
            .with_field("A__c", FieldValue::Id(RecordId::new("x")))];
        let err = check_junction_uniqueness(&store, &mut batch, "A__c", "B__c").unwrap_err();
        assert!(err.is_cast());
        assert!(batch.iter().all(|r| !r.has_errors()));
    }

    #[test]
    fn test_annotation_preserves_field_values() {
        let store = MemoryJunctionStore::new();
        store.insert(junction("jA", "x", "y"));
        store.insert(junction("jB", "x", "y"));

        let mut batch = vec![junction("jA", "x", "y")];
        check_junction_uniqueness(&store, &mut batch, "A__c", "B__c").unwrap();

        assert!(batch[0].has_errors());
        assert_eq!(
            batch[0].get("A__c"),
            Some(&FieldValue::Id(RecordId::new("x")))
        );
        assert_eq!(
            batch[0].get("B__c"),
            Some(&FieldValue::Id(RecordId::new("y")))
        );
    }
}
