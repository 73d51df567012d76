//! Read-only lookups of existing resources

use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use zia_content::{Record, ResourceId};
use zia_schema::ResourceSchema;

use crate::gateway::{GatewayError, ResourceGateway};
use crate::{Error, Result};

/// Which resources a query selects; `id` takes precedence over `name`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub id: Option<ResourceId>,
    pub name: Option<String>,
}

impl QueryFilter {
    pub fn by_id(id: impl Into<ResourceId>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }
}

/// Resources returned by a query. Queries never change anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryReport {
    pub kind: String,
    pub changed: bool,
    pub data: Vec<Value>,
}

/// Read access to one resource kind
pub struct Query<'s, G> {
    schema: &'s ResourceSchema,
    gateway: G,
}

impl<'s, G: ResourceGateway> Query<'s, G> {
    pub fn new(schema: &'s ResourceSchema, gateway: G) -> Self {
        Self { schema, gateway }
    }

    /// # Errors
    ///
    /// [`Error::NotFound`] if no resource has this id.
    pub fn by_id(&self, id: &ResourceId) -> Result<Record> {
        debug!(kind = %self.schema.kind, id = %id, "Querying by id");
        self.gateway
            .get(id)
            .map_err(|e| self.lookup_error(e))?
            .ok_or_else(|| Error::NotFound {
                kind: self.schema.kind.clone(),
                what: format!("id {}", id),
            })
    }

    /// First listed resource whose name, or any name alias, equals `name`.
    pub fn by_name(&self, name: &str) -> Result<Record> {
        debug!(kind = %self.schema.kind, name, "Querying by name");
        self.all()?
            .into_iter()
            .find(|record| {
                self.schema
                    .lookup_fields()
                    .any(|field| record.field_equals(field, name))
            })
            .ok_or_else(|| Error::NotFound {
                kind: self.schema.kind.clone(),
                what: format!("name '{}'", name),
            })
    }

    pub fn all(&self) -> Result<Vec<Record>> {
        self.gateway.list().map_err(|e| self.lookup_error(e))
    }

    pub fn run(&self, filter: &QueryFilter) -> Result<QueryReport> {
        let records = match (&filter.id, &filter.name) {
            (Some(id), _) => vec![self.by_id(id)?],
            (None, Some(name)) => vec![self.by_name(name)?],
            (None, None) => self.all()?,
        };
        Ok(QueryReport {
            kind: self.schema.kind.clone(),
            changed: false,
            data: records.into_iter().map(Record::into_value).collect(),
        })
    }

    fn lookup_error(&self, source: GatewayError) -> Error {
        Error::Lookup {
            kind: self.schema.kind.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MemoryGateway;
    use serde_json::json;
    use zia_schema::builtins::{dlp_engine, vpn_credential};

    fn engines() -> MemoryGateway {
        MemoryGateway::with_records([
            Record::from_value(json!({"id": 1, "name": "", "predefined_engine_name": "PCI"}))
                .unwrap(),
            Record::from_value(json!({"id": 2, "name": "Custom", "custom_dlp_engine": true}))
                .unwrap(),
        ])
    }

    #[test]
    fn test_by_name_matches_alias() {
        let schema = dlp_engine();
        let gateway = engines();
        let query = Query::new(&schema, &gateway);
        assert_eq!(query.by_name("PCI").unwrap().get("id"), Some(&json!(1)));
        assert_eq!(query.by_name("Custom").unwrap().get("id"), Some(&json!(2)));
    }

    #[test]
    fn test_by_name_requires_exact_text() {
        let schema = dlp_engine();
        let gateway = engines();
        let query = Query::new(&schema, &gateway);
        assert!(matches!(query.by_name("Custom "), Err(Error::NotFound { .. })));
        assert!(matches!(query.by_name("custom"), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_by_id_not_found() {
        let schema = dlp_engine();
        let gateway = engines();
        let err = Query::new(&schema, &gateway)
            .by_id(&ResourceId::from(9))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(err.to_string(), "dlp_engine not found: id 9");
    }

    #[test]
    fn test_run_without_filter_lists_all() {
        let schema = dlp_engine();
        let gateway = engines();
        let report = Query::new(&schema, &gateway)
            .run(&QueryFilter::default())
            .unwrap();
        assert_eq!(report.data.len(), 2);
        assert!(!report.changed);
    }

    #[test]
    fn test_vpn_credential_matches_fqdn() {
        let schema = vpn_credential();
        let gateway = MemoryGateway::with_records([Record::from_value(
            json!({"id": 4, "fqdn": "branch@example.com", "type": "UFQDN"}),
        )
        .unwrap()]);
        let report = Query::new(&schema, &gateway)
            .run(&QueryFilter::by_name("branch@example.com"))
            .unwrap();
        assert_eq!(report.data[0]["id"], json!(4));
        assert!(gateway.mutating_calls().is_empty());
    }
}
