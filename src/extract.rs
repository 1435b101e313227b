//! Identifier and value extraction over record collections.
//!
//! These are pure reads: input records are never mutated, and results are
//! sets, so duplicates in the source collapse and order is not preserved.

use std::collections::HashSet;

use crate::error::RecordResult;
use crate::record::{FieldRef, Record, RecordId};
use crate::value::FieldValue;

/// Collects each record's own identifier into a set.
///
/// Infallible: every record carries an id. The result size is at most the
/// input length (duplicates collapse).
///
/// # Examples
///
/// ```
/// use recordset::{extract_ids, Record, RecordId};
///
/// let records = vec![
///     Record::new("Child__c", RecordId::new("c01")),
///     Record::new("Child__c", RecordId::new("c02")),
/// ];
/// let ids = extract_ids(&records);
/// assert_eq!(ids.len(), 2);
/// assert!(ids.contains(&RecordId::new("c01")));
/// ```
#[must_use]
pub fn extract_ids(records: &[Record]) -> HashSet<RecordId> {
    records.iter().map(|r| r.id.clone()).collect()
}

/// Reads `field` from every record and interprets each value as an
/// identifier, collecting the distinct ids.
///
/// Accepts the field by name or by typed descriptor.
///
/// # Errors
/// Fails on the first record whose field is missing, null, or not
/// id-shaped; no partial result is returned.
pub fn extract_ids_from(
    records: &[Record],
    field: impl Into<FieldRef>,
) -> RecordResult<HashSet<RecordId>> {
    let field = field.into();
    let mut ids = HashSet::with_capacity(records.len());
    for record in records {
        ids.insert(record.read_id(field.clone())?);
    }
    Ok(ids)
}

/// Reads `field` from every record and collects the distinct raw values,
/// with no coercion beyond what the field already stores.
///
/// # Errors
/// Fails if any record lacks the field. Null is a value here, not an
/// error: a stored null appears in the result as [`FieldValue::Null`].
pub fn extract_values(
    records: &[Record],
    field: impl Into<FieldRef>,
) -> RecordResult<HashSet<FieldValue>> {
    let field = field.into();
    let mut values = HashSet::with_capacity(records.len());
    for record in records {
        values.insert(record.read(field.clone())?.clone());
    }
    Ok(values)
}
