//! Field values that records can hold.
//!
//! Values cover the narrow set of shapes the utilities operate on:
//! identifiers, text, decimal numbers, and null.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::record::RecordId;

/// Possible values a record field can hold.
///
/// # Examples
///
/// ```
/// use recordset::FieldValue;
///
/// let num = FieldValue::Number(42.0);
/// let text = FieldValue::String("hello".to_string());
///
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// A reference to another record.
    Id(RecordId),
    /// Free-form text.
    String(String),
    /// A decimal number.
    Number(f64),
    /// An unset field.
    Null,
}

impl FieldValue {
    /// Returns true if this value is an identifier.
    #[must_use]
    pub const fn is_id(&self) -> bool {
        matches!(self, Self::Id(_))
    }

    /// Returns true if this value is text.
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Returns true if this value is numeric.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns true if this value is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the identifier if this value holds one.
    #[must_use]
    pub const fn as_id(&self) -> Option<&RecordId> {
        match self {
            Self::Id(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the text if this value holds some.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the number if this value holds one.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Interprets this value as an identifier, read from `field`.
    ///
    /// An [`Id`](Self::Id) passes through unchanged. A [`String`](Self::String)
    /// is accepted only when it parses as a well-formed [`RecordId`]. Anything
    /// else is a cast error naming the field.
    ///
    /// # Errors
    /// - [`RecordError::InvalidId`]: text that is not a valid id
    /// - [`RecordError::TypeMismatch`]: numeric or null value
    pub fn to_id(&self, field: &str) -> Result<RecordId, RecordError> {
        match self {
            Self::Id(v) => Ok(v.clone()),
            Self::String(s) => RecordId::parse(s).map_err(|_| RecordError::InvalidId {
                field: field.to_string(),
                value: s.clone(),
            }),
            other => Err(RecordError::TypeMismatch {
                field: field.to_string(),
                expected: "id",
                actual: other.type_name(),
            }),
        }
    }

    /// Interprets this value as a number, read from `field`.
    ///
    /// Null is a cast-time failure, not an implicit zero.
    ///
    /// # Errors
    /// - [`RecordError::NullField`]: the field is null
    /// - [`RecordError::TypeMismatch`]: the field holds a non-numeric value
    pub fn to_number(&self, field: &str) -> Result<f64, RecordError> {
        match self {
            Self::Number(v) => Ok(*v),
            Self::Null => Err(RecordError::NullField {
                field: field.to_string(),
                expected: "number",
            }),
            other => Err(RecordError::TypeMismatch {
                field: field.to_string(),
                expected: "number",
                actual: other.type_name(),
            }),
        }
    }

    /// Returns a human-readable type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Null => "null",
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Null
    }
}

// Numbers compare and hash by bit pattern so values can live in a HashSet.
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Id(a), Self::Id(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a.to_bits() == b.to_bits(),
            (Self::Null, Self::Null) => true,
            _ => false,
        }
    }
}

impl Eq for FieldValue {}

impl Hash for FieldValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Id(v) => v.hash(state),
            Self::String(v) => v.hash(state),
            Self::Number(v) => v.to_bits().hash(state),
            Self::Null => {}
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Number(v) => write!(f, "{v}"),
            Self::Null => write!(f, "null"),
        }
    }
}

impl From<RecordId> for FieldValue {
    fn from(v: RecordId) -> Self {
        Self::Id(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for FieldValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}
