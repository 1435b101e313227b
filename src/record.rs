//! Record types and field references.
//!
//! A [`Record`] is a generic entity with a stable identifier and named
//! fields, supplied fully materialized by the caller. The utilities in this
//! crate never create, persist, or delete records; the only mutation they
//! ever perform is attaching an advisory validation-error annotation.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::value::FieldValue;

/// Opaque, comparable record identifier.
///
/// Ids are compared and hashed by exact string content. Callers normally
/// receive ids from the platform; [`RecordId::parse`] is the gate used when
/// coercing text field values into identifiers.
///
/// # Examples
///
/// ```
/// use recordset::RecordId;
///
/// let id = RecordId::new("a01B000000abcde");
/// assert_eq!(id.as_str(), "a01B000000abcde");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates an id from a known-good token.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parses text into an id, validating its shape.
    ///
    /// A well-formed id is non-empty ASCII-alphanumeric text.
    ///
    /// # Errors
    /// [`RecordError::MalformedId`] when the text is empty or contains
    /// characters outside `[0-9A-Za-z]`.
    pub fn parse(s: &str) -> Result<Self, RecordError> {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Ok(Self(s.to_string()))
        } else {
            Err(RecordError::MalformedId {
                value: s.to_string(),
            })
        }
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Typed description of a field on a specific object type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Object type the field belongs to.
    pub object_type: String,
    /// API name of the field.
    pub name: String,
}

impl FieldDescriptor {
    /// Creates a descriptor for `name` on `object_type`.
    #[must_use]
    pub fn new(object_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            name: name.into(),
        }
    }
}

/// Reference to a field, by typed descriptor or by plain name.
///
/// Both forms resolve to the same field; every operation taking a field
/// accepts `impl Into<FieldRef>` so either call style delegates to one
/// string-keyed lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldRef {
    /// Reference by string name.
    Name(String),
    /// Reference by typed descriptor.
    Descriptor(FieldDescriptor),
}

impl FieldRef {
    /// Returns the canonical field name this reference resolves to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(n) => n,
            Self::Descriptor(d) => &d.name,
        }
    }
}

impl From<&str> for FieldRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for FieldRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<FieldDescriptor> for FieldRef {
    fn from(descriptor: FieldDescriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}

impl From<&FieldDescriptor> for FieldRef {
    fn from(descriptor: &FieldDescriptor) -> Self {
        Self::Descriptor(descriptor.clone())
    }
}

/// A generic record: an object type, a unique id, and named fields.
///
/// Records also carry advisory validation-error annotations. An annotation
/// never alters field values; by platform convention the caller's save
/// pipeline rejects an annotated record atomically while un-annotated
/// records in the same batch may still succeed.
///
/// # Examples
///
/// ```
/// use recordset::{FieldValue, Record, RecordId};
///
/// let rec = Record::new("Session__c", RecordId::new("a01X"))
///     .with_field("Amount__c", FieldValue::Number(25.0));
/// assert_eq!(rec.get("Amount__c"), Some(&FieldValue::Number(25.0)));
/// assert!(!rec.has_errors());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Object type name (e.g. a junction or child object).
    pub object_type: String,

    /// Unique record identifier.
    pub id: RecordId,

    fields: HashMap<String, FieldValue>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

impl Record {
    /// Creates a record with no fields.
    #[must_use]
    pub fn new(object_type: impl Into<String>, id: RecordId) -> Self {
        Self {
            object_type: object_type.into(),
            id,
            fields: HashMap::new(),
            errors: Vec::new(),
        }
    }

    /// Builder-style field assignment.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Sets a field value, replacing any previous value.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Returns a field's value, if the field is present.
    #[must_use]
    pub fn get(&self, field: impl Into<FieldRef>) -> Option<&FieldValue> {
        self.fields.get(field.into().name())
    }

    /// Returns a field's value, failing if the field is absent.
    ///
    /// # Errors
    /// [`RecordError::MissingField`] when the record has no such field.
    pub fn read(&self, field: impl Into<FieldRef>) -> Result<&FieldValue, RecordError> {
        let field = field.into();
        self.fields
            .get(field.name())
            .ok_or_else(|| RecordError::MissingField {
                field: field.name().to_string(),
            })
    }

    /// Reads a field and interprets its value as an identifier.
    ///
    /// # Errors
    /// Missing field, null, or non-id-shaped values are cast errors.
    pub fn read_id(&self, field: impl Into<FieldRef>) -> Result<RecordId, RecordError> {
        let field = field.into();
        self.read(field.clone())?.to_id(field.name())
    }

    /// Reads a field and interprets its value as a number.
    ///
    /// # Errors
    /// Missing field, null, or non-numeric values are cast errors.
    pub fn read_number(&self, field: impl Into<FieldRef>) -> Result<f64, RecordError> {
        let field = field.into();
        self.read(field.clone())?.to_number(field.name())
    }

    /// Attaches a validation-error annotation to this record.
    ///
    /// Annotations accumulate; attaching never touches field values.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Returns the annotations attached so far.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Returns true if any annotation is attached.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the number of fields on this record.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_parse() {
        assert!(RecordId::parse("a01B000000abcde").is_ok());
        assert!(RecordId::parse("").is_err());
        assert!(RecordId::parse("has spaces").is_err());
        assert!(RecordId::parse("semi;colon").is_err());
    }

    #[test]
    fn test_record_id_display() {
        let id = RecordId::new("a01X");
        assert_eq!(format!("{id}"), "a01X");
    }

    #[test]
    fn test_field_ref_resolves_same_field() {
        let by_name = FieldRef::from("Parent__c");
        let by_descriptor = FieldRef::from(FieldDescriptor::new("Junction__c", "Parent__c"));
        assert_eq!(by_name.name(), by_descriptor.name());
    }

    #[test]
    fn test_record_get_and_read() {
        let rec = Record::new("Child__c", RecordId::new("c01"))
            .with_field("Amount__c", 10.0)
            .with_field("Name", "first");

        assert_eq!(rec.get("Amount__c"), Some(&FieldValue::Number(10.0)));
        assert_eq!(rec.get("Missing__c"), None);
        assert!(matches!(
            rec.read("Missing__c").unwrap_err(),
            RecordError::MissingField { .. }
        ));
    }

    #[test]
    fn test_record_read_by_descriptor() {
        let rec = Record::new("Child__c", RecordId::new("c01"))
            .with_field("Parent__c", FieldValue::Id(RecordId::new("p01")));
        let descriptor = FieldDescriptor::new("Child__c", "Parent__c");
        assert_eq!(rec.read_id(&descriptor).unwrap(), RecordId::new("p01"));
    }

    #[test]
    fn test_record_read_number() {
        let rec = Record::new("Child__c", RecordId::new("c01")).with_field("Amount__c", 7.5);
        assert!((rec.read_number("Amount__c").unwrap() - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_annotations_accumulate() {
        let mut rec = Record::new("Junction__c", RecordId::new("j01")).with_field("N", 1.0);
        assert!(!rec.has_errors());

        rec.add_error("first problem");
        rec.add_error("second problem");

        assert!(rec.has_errors());
        assert_eq!(rec.errors().len(), 2);
        // Annotation never disturbs field values.
        assert_eq!(rec.get("N"), Some(&FieldValue::Number(1.0)));
    }

    #[test]
    fn test_record_serialization() {
        let rec = Record::new("Child__c", RecordId::new("c01")).with_field("Amount__c", 3.0);
        let json = serde_json::to_string(&rec).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(rec, back);
    }
}
