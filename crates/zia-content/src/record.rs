//! Resource records
//!
//! A [`Record`] is the field map of one resource as exchanged with the
//! remote API. [`DesiredResource`] and [`RemoteResource`] wrap a record with
//! the guarantees each side provides.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use zia_schema::{ResourceSchema, stable_key_text};

use crate::error::{Error, Result};

/// Field map of a single resource, in insertion order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a record from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::NotAnObject {
                found: describe(&other).to_string(),
            }),
        }
    }

    /// Get a field; `null` is reported as absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    /// Text form of a field holding a string or number.
    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field).and_then(stable_key_text)
    }

    /// A string field exactly as stored; numbers are not converted.
    pub fn str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Whether a string field holds exactly `expected`, without trimming or
    /// case folding.
    pub fn field_equals(&self, field: &str, expected: &str) -> bool {
        self.str(field) == Some(expected)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.into_value()
    }
}

/// Remote-assigned identifier.
///
/// The API hands out numeric ids, but callers and older payloads use text.
/// Ids are always compared by their text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse an identifier from a string or number value.
    pub fn from_value(value: &Value) -> Option<Self> {
        stable_key_text(value).filter(|s| !s.is_empty()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// JSON form for payloads: a number when the id is numeric.
    pub fn to_value(&self) -> Value {
        match self.0.parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::String(self.0.clone()),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Target state declared by the caller.
///
/// Built once per invocation; there are no mutating accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct DesiredResource {
    kind: String,
    id: Option<ResourceId>,
    name: String,
    record: Record,
}

impl DesiredResource {
    /// Wrap an already-validated record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingName`] if the schema's name field is unset.
    pub fn new(schema: &ResourceSchema, record: Record) -> Result<Self> {
        let name = record
            .text(&schema.name_field)
            .ok_or_else(|| Error::MissingName {
                kind: schema.kind.clone(),
                field: schema.name_field.clone(),
            })?;
        let id = record.get(&schema.id_field).and_then(ResourceId::from_value);

        Ok(Self {
            kind: schema.kind.clone(),
            id,
            name,
            record,
        })
    }

    /// Validate raw caller input against the schema, then wrap it.
    pub fn from_input(schema: &ResourceSchema, input: &Value) -> Result<Self> {
        let cleaned = schema.validate(input)?;
        Self::new(schema, Record::from(cleaned))
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn id(&self) -> Option<&ResourceId> {
        self.id.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn record(&self) -> &Record {
        &self.record
    }
}

/// Last-known remote state; always carries its remote-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResource {
    id: ResourceId,
    record: Record,
}

impl RemoteResource {
    /// # Errors
    ///
    /// Returns [`Error::MissingId`] if the record has no usable id.
    pub fn from_record(schema: &ResourceSchema, record: Record) -> Result<Self> {
        let id = record
            .get(&schema.id_field)
            .and_then(ResourceId::from_value)
            .ok_or_else(|| Error::MissingId {
                kind: schema.kind.clone(),
                field: schema.id_field.clone(),
            })?;
        Ok(Self { id, record })
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
