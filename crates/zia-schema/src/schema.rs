//! Resource schema - the declared field set of one resource kind

use serde::{Deserialize, Serialize};

use crate::field::FieldSpec;

fn default_id_field() -> String {
    "id".to_string()
}

fn default_name_field() -> String {
    "name".to_string()
}

fn default_managed() -> bool {
    true
}

/// Declared shape of one kind of remote resource.
///
/// Fields that are not declared here are treated as server-computed: they
/// are accepted from the remote side but never compared and never sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSchema {
    /// Machine-readable kind (e.g., "zpa_gateway")
    pub kind: String,
    /// Human-readable title (e.g., "ZPA Gateway")
    pub title: String,
    /// Remote-assigned identifier field, never compared
    #[serde(default = "default_id_field")]
    pub id_field: String,
    /// Field that is unique within the remote collection
    #[serde(default = "default_name_field")]
    pub name_field: String,
    /// Extra fields that also satisfy a lookup by name
    #[serde(default)]
    pub name_aliases: Vec<String>,
    /// Whether the kind supports present/absent reconciliation
    #[serde(default = "default_managed")]
    pub managed: bool,
    /// Declared fields, in payload order
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl ResourceSchema {
    /// Create a managed schema with default id and name fields.
    pub fn new(kind: &str, title: &str) -> Self {
        Self {
            kind: kind.to_string(),
            title: title.to_string(),
            id_field: default_id_field(),
            name_field: default_name_field(),
            name_aliases: Vec::new(),
            managed: true,
            fields: Vec::new(),
        }
    }

    /// Mark the kind as read-only (lookups only).
    pub fn read_only(mut self) -> Self {
        self.managed = false;
        self
    }

    pub fn with_name_field(mut self, field: &str) -> Self {
        self.name_field = field.to_string();
        self
    }

    pub fn with_name_alias(mut self, field: &str) -> Self {
        self.name_aliases.push(field.to_string());
        self
    }

    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether `name` is a declared field.
    pub fn is_declared(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Names of every field a name lookup should match against.
    pub fn lookup_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name_field.as_str())
            .chain(self.name_aliases.iter().map(String::as_str))
    }
}
