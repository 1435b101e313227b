//! Child-to-parent rollup deltas.
//!
//! Computes, per parent id, the net numeric change between a new-state and
//! an old-state collection of the same logical children. Used where the
//! platform offers no native roll-up for the relationship type: the caller
//! applies the returned deltas to the parent records itself.

use std::collections::HashMap;

use crate::error::RecordResult;
use crate::record::{FieldRef, Record, RecordId};

/// Sums `sign * value` per parent id into `deltas`.
fn accumulate(
    deltas: &mut HashMap<RecordId, f64>,
    records: &[Record],
    value_field: &FieldRef,
    parent_field: &FieldRef,
    sign: f64,
) -> RecordResult<()> {
    for record in records {
        let parent = record.read_id(parent_field.clone())?;
        let value = record.read_number(value_field.clone())?;
        *deltas.entry(parent).or_insert(0.0) += sign * value;
    }
    Ok(())
}

/// Diffs two states of a child collection into per-parent deltas.
///
/// Each new-state record contributes `+value` to its parent's total and
/// each old-state record contributes `-value`; entries whose final total
/// is exactly zero are dropped. Either collection may be absent (treated
/// as empty). A pure read-only diff: input records and the store are never
/// touched.
///
/// # Examples
///
/// ```
/// use recordset::{summarize_changes_on_parent_value, FieldValue, Record, RecordId};
///
/// let new_state = vec![Record::new("Child__c", RecordId::new("c1"))
///     .with_field("Parent__c", FieldValue::Id(RecordId::new("p1")))
///     .with_field("Amount__c", 15.0)];
/// let old_state = vec![Record::new("Child__c", RecordId::new("c1"))
///     .with_field("Parent__c", FieldValue::Id(RecordId::new("p1")))
///     .with_field("Amount__c", 10.0)];
///
/// let deltas = summarize_changes_on_parent_value(
///     Some(&new_state),
///     Some(&old_state),
///     "Amount__c",
///     "Parent__c",
/// )
/// .unwrap();
/// assert_eq!(deltas.get(&RecordId::new("p1")), Some(&5.0));
/// ```
///
/// # Errors
/// A null or non-numeric value, or a parent reference that is not
/// id-shaped, is a fatal cast error (no implicit zero).
pub fn summarize_changes_on_parent_value(
    new_records: Option<&[Record]>,
    old_records: Option<&[Record]>,
    child_value_field: impl Into<FieldRef>,
    child_parent_field: impl Into<FieldRef>,
) -> RecordResult<HashMap<RecordId, f64>> {
    let value_field = child_value_field.into();
    let parent_field = child_parent_field.into();

    let mut deltas = HashMap::new();
    if let Some(records) = new_records {
        accumulate(&mut deltas, records, &value_field, &parent_field, 1.0)?;
    }
    if let Some(records) = old_records {
        accumulate(&mut deltas, records, &value_field, &parent_field, -1.0)?;
    }

    deltas.retain(|_, delta| *delta != 0.0);
    Ok(deltas)
}
