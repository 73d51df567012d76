//! Normalization of desired and remote records into canonical form

use std::collections::BTreeMap;

use serde_json::Value;
use zia_schema::{FieldKind, FieldSpec, ResourceSchema, ScalarType, stable_key_text};

use crate::canonical::{CanonicalResource, CanonicalValue};
use crate::error::{Error, Result};
use crate::record::Record;

/// Bring a record into canonical form under `schema`.
///
/// - the top-level identifier is dropped, as is every undeclared field
/// - stable keys become text regardless of their source type
/// - scalars are coerced to their declared type
/// - sets are sorted and de-duplicated
/// - nested sub-resources are normalized one by one and keyed by stable key
/// - absent values and empty collections become [`CanonicalValue::Null`]
///
/// # Errors
///
/// Returns [`Error::MalformedResource`] when a nested item has no stable key
/// or a value cannot represent its declared type.
pub fn normalize(schema: &ResourceSchema, record: &Record) -> Result<CanonicalResource> {
    let map = record.as_map();
    let mut canonical = CanonicalResource::new();

    for field in &schema.fields {
        if field.name == schema.id_field {
            continue;
        }
        let value = normalize_value(&schema.kind, &field.name, field, map.get(&field.name))?;
        canonical.set(field.name.clone(), value);
    }

    Ok(canonical)
}

fn normalize_fields(
    kind: &str,
    prefix: &str,
    fields: &[FieldSpec],
    item: &serde_json::Map<String, Value>,
) -> Result<CanonicalResource> {
    let mut canonical = CanonicalResource::new();
    for field in fields {
        let path = format!("{}.{}", prefix, field.name);
        let value = normalize_value(kind, &path, field, item.get(&field.name))?;
        canonical.set(field.name.clone(), value);
    }
    Ok(canonical)
}

fn normalize_value(
    kind: &str,
    path: &str,
    field: &FieldSpec,
    value: Option<&Value>,
) -> Result<CanonicalValue> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(CanonicalValue::Null);
    };

    match &field.kind {
        FieldKind::Scalar { scalar } => {
            coerce(kind, path, *scalar, value).map(CanonicalValue::Scalar)
        }

        FieldKind::StableKey => stable_key_text(value)
            .map(CanonicalValue::Key)
            .ok_or_else(|| Error::malformed(kind, path, "stable key must be a string or number")),

        FieldKind::Set { scalar } => {
            let items = value
                .as_array()
                .ok_or_else(|| Error::malformed(kind, path, "expected a list"))?;
            let mut coerced = items
                .iter()
                .map(|item| coerce(kind, path, *scalar, item))
                .collect::<Result<Vec<_>>>()?;
            coerced.sort_by_key(|v| v.to_string());
            coerced.dedup();
            if coerced.is_empty() {
                Ok(CanonicalValue::Null)
            } else {
                Ok(CanonicalValue::Set(coerced))
            }
        }

        FieldKind::Nested { key, many, fields } => {
            let items: Vec<&Value> = match (many, value) {
                (true, Value::Array(items)) => items.iter().filter(|v| !v.is_null()).collect(),
                (true, _) => return Err(Error::malformed(kind, path, "expected a list of objects")),
                (false, Value::Object(_)) => vec![value],
                (false, _) => return Err(Error::malformed(kind, path, "expected an object")),
            };

            let mut keyed = BTreeMap::new();
            for item in items {
                let obj = item
                    .as_object()
                    .ok_or_else(|| Error::malformed(kind, path, "nested item is not an object"))?;
                let item_key = obj
                    .get(key)
                    .filter(|v| !v.is_null())
                    .and_then(stable_key_text)
                    .ok_or_else(|| {
                        let reason = format!("nested item has no stable key '{}'", key);
                        Error::malformed(kind, path, reason)
                    })?;
                let item_path = format!("{}[{}]", path, item_key);
                let canonical = normalize_fields(kind, &item_path, fields, obj)?;
                if keyed.insert(item_key.clone(), canonical).is_some() {
                    return Err(Error::malformed(
                        kind,
                        path,
                        format!("duplicate stable key '{}'", item_key),
                    ));
                }
            }

            if keyed.is_empty() {
                Ok(CanonicalValue::Null)
            } else {
                Ok(CanonicalValue::Nested(keyed))
            }
        }
    }
}

fn coerce(kind: &str, path: &str, scalar: ScalarType, value: &Value) -> Result<Value> {
    scalar.coerce(value).ok_or_else(|| {
        let reason = format!("expected {}, got {}", scalar.describe(), value);
        Error::malformed(kind, path, reason)
    })
}
