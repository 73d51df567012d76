//! Kinds command implementation

use colored::Colorize;
use serde_json::json;
use zia_schema::SchemaRegistry;

use crate::error::Result;

/// Run the kinds command
pub fn run_kinds(json: bool) -> Result<()> {
    let registry = SchemaRegistry::with_builtins();

    if json {
        let output: Vec<_> = registry
            .iter()
            .map(|schema| {
                json!({
                    "kind": schema.kind,
                    "title": schema.title,
                    "managed": schema.managed,
                    "fields": schema.fields.iter().map(|f| &f.name).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Resource kinds:".bold());
    for schema in registry.iter() {
        let mode = if schema.managed {
            "managed".green()
        } else {
            "read-only".dimmed()
        };
        println!("  {:<28} {:<28} {}", schema.kind.cyan(), schema.title, mode);
    }
    Ok(())
}
