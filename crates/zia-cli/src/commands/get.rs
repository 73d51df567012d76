//! Get command implementation

use std::path::Path;

use colored::Colorize;
use serde_json::Value;
use zia_content::ResourceId;
use zia_core::config::Manifest;
use zia_core::{Query, QueryFilter};
use zia_schema::{SchemaRegistry, stable_key_text};

use crate::error::{CliError, Result};
use crate::store::JsonStore;

/// Run the get command
///
/// The manifest is optional here; without one the store is looked up in the
/// current directory.
pub fn run_get(
    config: &Path,
    kind: &str,
    id: Option<&str>,
    name: Option<&str>,
    json: bool,
) -> Result<()> {
    let manifest = if config.exists() {
        Manifest::load(config)?
    } else {
        Manifest::default()
    };
    let registry = SchemaRegistry::with_builtins();
    let schema = registry.require(kind).map_err(zia_core::Error::from)?;
    let store = JsonStore::load(&manifest.store.path)?;
    let gateway = store.gateway(kind);

    if id.is_some_and(|id| id.trim().is_empty()) {
        return Err(CliError::user("--id must not be empty"));
    }
    let filter = QueryFilter {
        id: id.map(|id| ResourceId::new(id.trim())),
        name: name.map(str::to_string),
    };

    let report = Query::new(schema, &gateway).run(&filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.data.is_empty() {
        println!("No {} resources found.", kind.cyan());
        return Ok(());
    }

    println!("{} ({})", schema.title.bold(), report.data.len());
    for record in &report.data {
        let id = record
            .get(&schema.id_field)
            .and_then(stable_key_text)
            .unwrap_or_default();
        let label = schema
            .lookup_fields()
            .find_map(|f| record.get(f).and_then(Value::as_str).filter(|s| !s.is_empty()))
            .unwrap_or("-");
        println!("  {} {}", format!("[{}]", id).dimmed(), label.bold());
    }
    Ok(())
}
