//! Field declarations for resource schemas
//!
//! Every resource kind declares the fields it manages. The declaration drives
//! three things: validation of caller input, normalization before comparison,
//! and which fields end up in create/update payloads.
//!
//! # Example TOML
//!
//! ```toml
//! name = "zpa_server_group"
//! required = true
//!
//! [kind]
//! type = "nested"
//! key = "external_id"
//! many = false
//!
//! [[kind.fields]]
//! name = "external_id"
//! kind = { type = "stable_key" }
//! required = true
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Primitive type of a scalar field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    String,
    Integer,
    Boolean,
}

impl ScalarType {
    /// Coerce a JSON value into this type's canonical representation.
    ///
    /// Returns `None` when the value cannot represent this type. `null` is
    /// never accepted here; callers treat it as "unset" before coercing.
    ///
    /// - `String` accepts strings, numbers and booleans (rendered as text)
    /// - `Integer` accepts integral numbers and numeric strings
    /// - `Boolean` accepts booleans and the strings `"true"` / `"false"`
    pub fn coerce(&self, value: &Value) -> Option<Value> {
        match (self, value) {
            (ScalarType::String, Value::String(_)) => Some(value.clone()),
            (ScalarType::String, Value::Number(n)) => Some(Value::String(n.to_string())),
            (ScalarType::String, Value::Bool(b)) => Some(Value::String(b.to_string())),

            (ScalarType::Integer, Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    Some(Value::from(i))
                } else {
                    n.as_u64().map(Value::from)
                }
            }
            (ScalarType::Integer, Value::String(s)) => {
                let trimmed = s.trim();
                if let Ok(i) = trimmed.parse::<i64>() {
                    Some(Value::from(i))
                } else {
                    trimmed.parse::<u64>().ok().map(Value::from)
                }
            }

            (ScalarType::Boolean, Value::Bool(_)) => Some(value.clone()),
            (ScalarType::Boolean, Value::String(s)) => match s.to_lowercase().as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },

            _ => None,
        }
    }

    /// Human-readable name used in error messages
    pub fn describe(&self) -> &'static str {
        match self {
            ScalarType::String => "a string",
            ScalarType::Integer => "an integer",
            ScalarType::Boolean => "a boolean",
        }
    }
}

/// Render a stable external key in its canonical text form.
///
/// The remote API and user configuration disagree on whether such keys are
/// numbers or strings; both map to the same text here. Strings are taken
/// verbatim, so `" 123"` and `"123"` stay distinct keys.
pub fn stable_key_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// How a field's value is shaped and compared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// A single primitive value
    Scalar { scalar: ScalarType },
    /// An identifier meaningful across systems, always compared as text
    StableKey,
    /// An unordered collection of primitive values
    Set { scalar: ScalarType },
    /// One or many sub-resources matched by their stable `key`
    Nested {
        key: String,
        #[serde(default)]
        many: bool,
        fields: Vec<FieldSpec>,
    },
}

/// Declaration of a single field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as used on the wire
    pub name: String,
    /// Shape of the value
    pub kind: FieldKind,
    /// Whether caller input must provide the field
    #[serde(default)]
    pub required: bool,
    /// Value applied during validation when the caller omits the field
    #[serde(default)]
    pub default: Option<Value>,
    /// Allowed values (compared as text); empty means unrestricted
    #[serde(default)]
    pub choices: Vec<String>,
    /// Optional documentation
    #[serde(default)]
    pub description: Option<String>,
}

impl FieldSpec {
    fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: false,
            default: None,
            choices: Vec::new(),
            description: None,
        }
    }

    pub fn string(name: &str) -> Self {
        Self::new(
            name,
            FieldKind::Scalar {
                scalar: ScalarType::String,
            },
        )
    }

    pub fn integer(name: &str) -> Self {
        Self::new(
            name,
            FieldKind::Scalar {
                scalar: ScalarType::Integer,
            },
        )
    }

    pub fn boolean(name: &str) -> Self {
        Self::new(
            name,
            FieldKind::Scalar {
                scalar: ScalarType::Boolean,
            },
        )
    }

    pub fn stable_key(name: &str) -> Self {
        Self::new(name, FieldKind::StableKey)
    }

    pub fn set_of(name: &str, scalar: ScalarType) -> Self {
        Self::new(name, FieldKind::Set { scalar })
    }

    /// A single sub-resource matched by `key`
    pub fn nested_one(name: &str, key: &str, fields: Vec<FieldSpec>) -> Self {
        Self::new(
            name,
            FieldKind::Nested {
                key: key.to_string(),
                many: false,
                fields,
            },
        )
    }

    /// A list of sub-resources matched by `key`, order-insensitive
    pub fn nested_many(name: &str, key: &str, fields: Vec<FieldSpec>) -> Self {
        Self::new(
            name,
            FieldKind::Nested {
                key: key.to_string(),
                many: true,
                fields,
            },
        )
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn choices(mut self, choices: &[&str]) -> Self {
        self.choices = choices.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Sub-field declarations of a nested field, if any
    pub fn nested_fields(&self) -> Option<&[FieldSpec]> {
        match &self.kind {
            FieldKind::Nested { fields, .. } => Some(fields),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_coercion_renders_numbers() {
        assert_eq!(ScalarType::String.coerce(&json!(42)), Some(json!("42")));
        assert_eq!(ScalarType::String.coerce(&json!("x")), Some(json!("x")));
        assert_eq!(ScalarType::String.coerce(&json!([1])), None);
    }

    #[test]
    fn test_integer_coercion_accepts_numeric_strings() {
        assert_eq!(ScalarType::Integer.coerce(&json!("17")), Some(json!(17)));
        assert_eq!(ScalarType::Integer.coerce(&json!(17)), Some(json!(17)));
        assert_eq!(ScalarType::Integer.coerce(&json!("seventeen")), None);
        assert_eq!(ScalarType::Integer.coerce(&json!(1.5)), None);
    }

    #[test]
    fn test_boolean_coercion() {
        assert_eq!(ScalarType::Boolean.coerce(&json!("TRUE")), Some(json!(true)));
        assert_eq!(ScalarType::Boolean.coerce(&json!(false)), Some(json!(false)));
        assert_eq!(ScalarType::Boolean.coerce(&json!(1)), None);
    }

    #[test]
    fn test_stable_key_text() {
        assert_eq!(
            stable_key_text(&json!(216196257331370454_u64)).as_deref(),
            Some("216196257331370454")
        );
        assert_eq!(stable_key_text(&json!("123")).as_deref(), Some("123"));
        assert_eq!(stable_key_text(&json!(" 123")).as_deref(), Some(" 123"));
        assert_eq!(stable_key_text(&json!(null)), None);
    }

    #[test]
    fn test_parse_nested_field_from_toml() {
        let toml_str = r#"
name = "zpa_server_group"
required = true

[kind]
type = "nested"
key = "external_id"

[[kind.fields]]
name = "external_id"
kind = { type = "stable_key" }
required = true

[[kind.fields]]
name = "name"
kind = { type = "scalar", scalar = "string" }
"#;
        let field: FieldSpec = toml::from_str(toml_str).unwrap();
        assert!(field.required);
        assert_eq!(field.nested_fields().map(|f| f.len()), Some(2));
        assert!(matches!(field.kind, FieldKind::Nested { many: false, .. }));
    }
}
