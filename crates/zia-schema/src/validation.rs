//! Validation of caller input against a resource schema
//!
//! The same declarations that drive normalization drive validation, so a
//! validated input always normalizes cleanly.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::field::{FieldKind, FieldSpec, stable_key_text};
use crate::schema::ResourceSchema;

impl ResourceSchema {
    /// Validate caller input and return the cleaned field map.
    ///
    /// - the identifier field is accepted as an integer or numeric text
    /// - unknown fields are rejected
    /// - missing fields get their declared default, or fail if required
    /// - `null` counts as missing
    /// - scalar values are coerced to their declared type
    /// - stable keys keep their original form; normalization coerces them
    pub fn validate(&self, input: &Value) -> Result<Map<String, Value>> {
        let obj = input.as_object().ok_or_else(|| Error::NotAnObject {
            kind: self.kind.clone(),
            found: type_name(input).to_string(),
        })?;

        let mut cleaned = Map::new();

        if let Some(id) = obj.get(&self.id_field).filter(|v| !v.is_null()) {
            if stable_key_text(id).is_none() {
                return Err(Error::InvalidType {
                    kind: self.kind.clone(),
                    path: self.id_field.clone(),
                    expected: "an identifier".to_string(),
                    found: type_name(id).to_string(),
                });
            }
            cleaned.insert(self.id_field.clone(), id.clone());
        }

        for key in obj.keys() {
            if key != &self.id_field && !self.is_declared(key) {
                return Err(Error::UnknownField {
                    kind: self.kind.clone(),
                    path: key.clone(),
                });
            }
        }

        validate_fields(&self.kind, "", &self.fields, obj, &mut cleaned)?;
        debug!(kind = %self.kind, fields = cleaned.len(), "Validated input");
        Ok(cleaned)
    }
}

fn validate_fields(
    kind: &str,
    prefix: &str,
    fields: &[FieldSpec],
    obj: &Map<String, Value>,
    out: &mut Map<String, Value>,
) -> Result<()> {
    for field in fields {
        let path = join_path(prefix, &field.name);
        match obj.get(&field.name).filter(|v| !v.is_null()) {
            Some(value) => {
                let cleaned = validate_value(kind, &path, field, value)?;
                out.insert(field.name.clone(), cleaned);
            }
            None => {
                if let Some(default) = &field.default {
                    out.insert(field.name.clone(), default.clone());
                } else if field.required {
                    return Err(Error::MissingField {
                        kind: kind.to_string(),
                        path,
                    });
                }
            }
        }
    }
    Ok(())
}

fn validate_value(kind: &str, path: &str, field: &FieldSpec, value: &Value) -> Result<Value> {
    let invalid = |expected: &str| Error::InvalidType {
        kind: kind.to_string(),
        path: path.to_string(),
        expected: expected.to_string(),
        found: type_name(value).to_string(),
    };

    let cleaned = match &field.kind {
        FieldKind::Scalar { scalar } => scalar
            .coerce(value)
            .ok_or_else(|| invalid(scalar.describe()))?,
        FieldKind::StableKey => {
            stable_key_text(value).ok_or_else(|| invalid("a string or number key"))?;
            value.clone()
        }
        FieldKind::Set { scalar } => {
            let items = value.as_array().ok_or_else(|| invalid("a list"))?;
            let mut cleaned = Vec::with_capacity(items.len());
            for item in items {
                cleaned.push(scalar.coerce(item).ok_or_else(|| Error::InvalidType {
                    kind: kind.to_string(),
                    path: format!("{}[]", path),
                    expected: scalar.describe().to_string(),
                    found: type_name(item).to_string(),
                })?);
            }
            Value::Array(cleaned)
        }
        FieldKind::Nested { many, fields, .. } => {
            if *many {
                let items = value.as_array().ok_or_else(|| invalid("a list of objects"))?;
                let mut cleaned = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, i);
                    cleaned.push(validate_nested(kind, &item_path, fields, item)?);
                }
                Value::Array(cleaned)
            } else {
                validate_nested(kind, path, fields, value)?
            }
        }
    };

    if !field.choices.is_empty() {
        let text = match &cleaned {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if !field.choices.iter().any(|c| c == &text) {
            return Err(Error::InvalidChoice {
                kind: kind.to_string(),
                path: path.to_string(),
                value: text,
                choices: field.choices.clone(),
            });
        }
    }

    Ok(cleaned)
}

fn validate_nested(kind: &str, path: &str, fields: &[FieldSpec], value: &Value) -> Result<Value> {
    let obj = value.as_object().ok_or_else(|| Error::InvalidType {
        kind: kind.to_string(),
        path: path.to_string(),
        expected: "an object".to_string(),
        found: type_name(value).to_string(),
    })?;

    for key in obj.keys() {
        if !fields.iter().any(|f| &f.name == key) {
            return Err(Error::UnknownField {
                kind: kind.to_string(),
                path: join_path(path, key),
            });
        }
    }

    let mut cleaned = Map::new();
    validate_fields(kind, path, fields, obj, &mut cleaned)?;
    Ok(Value::Object(cleaned))
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> ResourceSchema {
        ResourceSchema::new("widget", "Widget")
            .with_field(FieldSpec::string("name").required())
            .with_field(FieldSpec::integer("rank"))
            .with_field(
                FieldSpec::string("mode")
                    .choices(&["A", "B"])
                    .default_value("A"),
            )
    }

    #[test]
    fn test_validate_applies_default() {
        let cleaned = schema().validate(&json!({"name": "w1"})).unwrap();
        assert_eq!(cleaned.get("mode"), Some(&json!("A")));
        assert!(!cleaned.contains_key("rank"));
    }

    #[test]
    fn test_validate_null_is_missing() {
        let err = schema().validate(&json!({"name": null})).unwrap_err();
        assert!(matches!(err, Error::MissingField { ref path, .. } if path == "name"));
    }

    #[test]
    fn test_validate_coerces_integer_text() {
        let cleaned = schema().validate(&json!({"name": "w1", "rank": "7"})).unwrap();
        assert_eq!(cleaned.get("rank"), Some(&json!(7)));
    }

    #[test]
    fn test_validate_rejects_non_object() {
        let err = schema().validate(&json!(["name"])).unwrap_err();
        assert!(matches!(err, Error::NotAnObject { .. }));
    }

    #[test]
    fn test_validate_keeps_identifier() {
        let cleaned = schema().validate(&json!({"id": 12, "name": "w1"})).unwrap();
        assert_eq!(cleaned.get("id"), Some(&json!(12)));
    }
}
