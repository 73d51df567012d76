//! Plan command implementation
//!
//! Previews what apply would change without applying it. This is apply in
//! check mode, with a unified diff of the canonical current and desired
//! forms of each changing resource.

use std::path::Path;

use colored::Colorize;
use serde_json::{Value, json};
use similar::TextDiff;
use zia_core::config::Manifest;
use zia_core::ReconcileReport;
use zia_schema::SchemaRegistry;

use super::apply::{EntryOutcome, action_marker, finish, reconcile_manifest};
use crate::error::Result;
use crate::store::JsonStore;

/// Run the plan command
pub fn run_plan(config: &Path, json: bool) -> Result<()> {
    let manifest = Manifest::load(config)?;
    let registry = SchemaRegistry::with_builtins();
    let mut store = JsonStore::load(&manifest.store.path)?;

    let outcomes = reconcile_manifest(&manifest, &registry, &mut store, true);
    let has_changes = outcomes
        .iter()
        .any(|o| matches!(&o.result, Ok(r) if r.changed));

    if json {
        let output = json!({
            "has_changes": has_changes,
            "changes": outcomes.iter().map(EntryOutcome::to_json).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_plan(&outcomes, has_changes);
    }

    finish(&outcomes)
}

/// Unified diff of the canonical current and desired forms.
pub fn render_diff(report: &ReconcileReport) -> String {
    let before = pretty(report.before.as_ref());
    let after = pretty(report.after.as_ref());
    TextDiff::from_lines(&before, &after)
        .unified_diff()
        .context_radius(3)
        .header("current", "desired")
        .to_string()
}

fn pretty(value: Option<&Value>) -> String {
    match value {
        Some(v) => {
            let mut text = serde_json::to_string_pretty(v).unwrap_or_default();
            text.push('\n');
            text
        }
        None => String::new(),
    }
}

fn print_plan(outcomes: &[EntryOutcome], has_changes: bool) {
    if !has_changes && outcomes.iter().all(|o| o.result.is_ok()) {
        println!(
            "{} No changes needed. Resources match the manifest.",
            "OK".green().bold()
        );
        return;
    }

    println!("{}", "Changes that would be made:".bold());
    println!();

    for outcome in outcomes {
        let report = match &outcome.result {
            Ok(report) if report.changed => report,
            Ok(_) => continue,
            Err(e) => {
                println!("  {} {}: {}", "!".red(), outcome.resource.cyan(), e);
                continue;
            }
        };

        println!(
            "  {} {} {}",
            action_marker(report.action),
            report.kind.cyan(),
            report.name.bold()
        );
        for line in render_diff(report).lines() {
            let line = match line.chars().next() {
                Some('+') if !line.starts_with("+++") => line.green(),
                Some('-') if !line.starts_with("---") => line.red(),
                Some('@') => line.cyan(),
                _ => line.normal(),
            };
            println!("      {}", line);
        }
    }

    println!();
    println!("Run {} to apply these changes.", "zia apply".cyan());
}
