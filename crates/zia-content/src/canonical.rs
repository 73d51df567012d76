//! Canonical resource representation
//!
//! Both sides of a comparison are brought into this form first. Two
//! canonical resources are equal exactly when the resources they came from
//! are semantically identical.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// A single field value in canonical form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalValue {
    /// Absent, `null`, or an empty collection
    Null,
    /// A primitive coerced to its declared type
    Scalar(Value),
    /// A stable external key, always text
    Key(String),
    /// An unordered collection, sorted and de-duplicated
    Set(Vec<Value>),
    /// Sub-resources keyed by their stable key
    Nested(BTreeMap<String, CanonicalResource>),
}

impl CanonicalValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CanonicalValue::Null)
    }

    /// Render for diagnostics and plan output.
    pub fn to_json(&self) -> Value {
        match self {
            CanonicalValue::Null => Value::Null,
            CanonicalValue::Scalar(v) => v.clone(),
            CanonicalValue::Key(k) => Value::String(k.clone()),
            CanonicalValue::Set(items) => Value::Array(items.clone()),
            CanonicalValue::Nested(items) => Value::Object(
                items
                    .iter()
                    .map(|(key, item)| (key.clone(), item.to_json()))
                    .collect(),
            ),
        }
    }
}

static NULL: CanonicalValue = CanonicalValue::Null;

/// A resource reduced to its declared fields in canonical form.
///
/// The remote-assigned identifier never appears here, at any level.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CanonicalResource {
    fields: BTreeMap<String, CanonicalValue>,
}

impl CanonicalResource {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(&mut self, field: impl Into<String>, value: CanonicalValue) {
        self.fields.insert(field.into(), value);
    }

    /// Value of a field; undeclared fields read as [`CanonicalValue::Null`].
    pub fn get(&self, field: &str) -> &CanonicalValue {
        self.fields.get(field).unwrap_or(&NULL)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render as a JSON object with fields in sorted order.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        Value::Object(map)
    }
}
