//! Schema registry
//!
//! Maps resource kinds to their schemas.

use std::collections::BTreeMap;

use crate::builtins::builtin_schemas;
use crate::error::{Error, Result};
use crate::schema::ResourceSchema;

/// Registry mapping resource kinds to their declared schemas.
///
/// # Example
///
/// ```
/// use zia_schema::SchemaRegistry;
///
/// let registry = SchemaRegistry::with_builtins();
/// assert!(registry.get("zpa_gateway").is_some());
/// assert!(registry.require("nope").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, ResourceSchema>,
}

impl SchemaRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            schemas: BTreeMap::new(),
        }
    }

    /// Create a registry with every built-in kind registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for schema in builtin_schemas() {
            registry.register(schema);
        }
        registry
    }

    /// Register a schema, replacing any previous schema of the same kind.
    pub fn register(&mut self, schema: ResourceSchema) {
        self.schemas.insert(schema.kind.clone(), schema);
    }

    pub fn get(&self, kind: &str) -> Option<&ResourceSchema> {
        self.schemas.get(kind)
    }

    /// Get a schema or fail with [`Error::UnknownKind`].
    pub fn require(&self, kind: &str) -> Result<&ResourceSchema> {
        self.get(kind).ok_or_else(|| Error::UnknownKind {
            kind: kind.to_string(),
        })
    }

    /// All registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceSchema> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
