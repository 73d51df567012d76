//! Apply command implementation
//!
//! Reconciles every manifest entry, in order, against the local store.

use std::path::Path;

use colored::Colorize;
use serde_json::{Value, json};
use zia_core::config::{Manifest, ResourceEntry};
use zia_core::{Action, ReconcileOptions, ReconcileReport, Reconciler};
use zia_schema::SchemaRegistry;

use crate::error::{CliError, Result, failure_json};
use crate::store::JsonStore;

/// Outcome of reconciling one manifest entry
pub struct EntryOutcome {
    pub resource: String,
    pub result: zia_core::Result<ReconcileReport>,
}

impl EntryOutcome {
    pub fn to_json(&self) -> Value {
        match &self.result {
            Ok(report) => report.to_json(),
            Err(e) => {
                let mut failure = failure_json(e.kind(), &e.to_string());
                failure["resource"] = json!(self.resource);
                failure
            }
        }
    }
}

/// Reconcile every entry, committing successful passes to the store.
///
/// A failing entry does not stop the ones after it.
pub fn reconcile_manifest(
    manifest: &Manifest,
    registry: &SchemaRegistry,
    store: &mut JsonStore,
    check_mode: bool,
) -> Vec<EntryOutcome> {
    manifest
        .resources
        .iter()
        .map(|entry| EntryOutcome {
            resource: entry.kind.clone(),
            result: reconcile_entry(manifest, entry, registry, store, check_mode),
        })
        .collect()
}

fn reconcile_entry(
    manifest: &Manifest,
    entry: &ResourceEntry,
    registry: &SchemaRegistry,
    store: &mut JsonStore,
    check_mode: bool,
) -> zia_core::Result<ReconcileReport> {
    let desired = entry.to_desired(registry, manifest.source_path())?;
    let schema = registry.require(&entry.kind)?;
    let gateway = store.gateway(&entry.kind);

    let report = Reconciler::new(schema, &gateway)
        .with_options(ReconcileOptions { check_mode })
        .reconcile(&desired, entry.state)?;

    if report.changed && !check_mode {
        store.commit(&entry.kind, gateway);
    }
    Ok(report)
}

/// Run the apply command
pub fn run_apply(config: &Path, check: bool, json: bool) -> Result<()> {
    let manifest = Manifest::load(config)?;
    let registry = SchemaRegistry::with_builtins();
    let mut store = JsonStore::load(&manifest.store.path)?;
    let check_mode = check || manifest.defaults.check_mode;

    let outcomes = reconcile_manifest(&manifest, &registry, &mut store, check_mode);

    let changed = outcomes
        .iter()
        .any(|o| matches!(&o.result, Ok(r) if r.changed));
    if changed && !check_mode {
        store.save()?;
    }

    if json {
        let output: Vec<Value> = outcomes.iter().map(EntryOutcome::to_json).collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_outcomes(&outcomes, check_mode);
    }

    finish(&outcomes)
}

/// Error out if any entry failed, after everything has been reported.
pub fn finish(outcomes: &[EntryOutcome]) -> Result<()> {
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        return Err(CliError::EntriesFailed {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}

fn print_outcomes(outcomes: &[EntryOutcome], check_mode: bool) {
    if outcomes.is_empty() {
        println!("{} No resources declared.", "OK".green().bold());
        return;
    }

    if check_mode {
        println!("{} Check mode, nothing will be changed", "=>".blue().bold());
    }

    for outcome in outcomes {
        match &outcome.result {
            Ok(report) => {
                println!(
                    "  {} {} {}: {}",
                    action_marker(report.action),
                    report.kind.cyan(),
                    report.name.bold(),
                    report.msg
                );
                for change in report.diff.iter() {
                    println!("      {} {}", "~".yellow(), change.field.dimmed());
                }
            }
            Err(e) => {
                println!("  {} {}: {}", "!".red(), outcome.resource.cyan(), e);
            }
        }
    }

    let changed = outcomes
        .iter()
        .filter(|o| matches!(&o.result, Ok(r) if r.changed))
        .count();
    println!();
    println!(
        "{} {} changed, {} unchanged",
        "Summary:".bold(),
        changed,
        outcomes.len() - changed
    );
}

pub(crate) fn action_marker(action: Action) -> colored::ColoredString {
    match action {
        Action::Create => "+".green(),
        Action::Update => "~".yellow(),
        Action::Delete => "-".red(),
        Action::NoOp => "=".dimmed(),
    }
}
