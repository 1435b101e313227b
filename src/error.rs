//! Error types for record collection utilities.
//!
//! All errors are strongly typed using thiserror. Failures propagate
//! immediately to the caller; nothing in this crate retries or catches.
//! Duplicate-junction findings are deliberately *not* errors — they surface
//! as per-record annotations instead (see [`crate::junction`]).

use thiserror::Error;

use crate::storage::StorageError;

/// Errors raised while reading or coercing record fields, plus storage
/// failures bubbled up from the grouped-count query.
#[derive(Debug, Error)]
pub enum RecordError {
    /// A field held a value of the wrong shape for the requested read.
    #[error("Field '{field}' holds a {actual} value, expected {expected}")]
    TypeMismatch {
        /// Field that was read.
        field: String,
        /// Shape the caller asked for.
        expected: &'static str,
        /// Shape actually found.
        actual: &'static str,
    },

    /// A null value where the read requires a concrete one (no implicit
    /// zero for numeric reads).
    #[error("Field '{field}' is null, expected {expected}")]
    NullField {
        /// Field that was read.
        field: String,
        /// Shape the caller asked for.
        expected: &'static str,
    },

    /// Text in an identifier position that is not a well-formed id.
    #[error("Field '{field}' value {value:?} is not a valid record id")]
    InvalidId {
        /// Field that was read.
        field: String,
        /// The offending text.
        value: String,
    },

    /// Text that failed bare id parsing, outside any field context.
    #[error("{value:?} is not a valid record id")]
    MalformedId {
        /// The offending text.
        value: String,
    },

    /// The record has no field with the given name.
    #[error("Record has no field '{field}'")]
    MissingField {
        /// Field that was requested.
        field: String,
    },

    /// A batch mixed records of different object types where one type is
    /// required.
    #[error("Mixed object types in one batch: expected '{expected}', found '{actual}'")]
    MixedObjectTypes {
        /// Object type of the first record in the batch.
        expected: String,
        /// The conflicting object type.
        actual: String,
    },

    /// The durable store failed; no partial work was applied.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl RecordError {
    /// Returns true if this is a type/shape coercion failure.
    #[must_use]
    pub const fn is_cast(&self) -> bool {
        matches!(
            self,
            Self::TypeMismatch { .. }
                | Self::NullField { .. }
                | Self::InvalidId { .. }
                | Self::MalformedId { .. }
                | Self::MissingField { .. }
        )
    }

    /// Returns true if this error originated in the durable store.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// Result type alias for record operations.
pub type RecordResult<T> = Result<T, RecordError>;
