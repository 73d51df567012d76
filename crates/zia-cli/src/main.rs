//! ZIA Resource Manager CLI
//!
//! The command-line interface for reconciling ZIA resources.

mod cli;
mod commands;
mod error;
mod store;

use std::io;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json = cli.command.as_ref().is_some_and(Commands::json);
    if let Err(e) = run(cli) {
        if !json {
            eprintln!("{}: {}", "error".red().bold(), e);
        } else if !e.is_reported() {
            println!("{}", e.to_json());
        }
        std::process::exit(1);
    }
}

/// Log to stderr. `ZIA_LOG` overrides the level chosen by `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("ZIA_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(verbose)
        .try_init();
    tracing::debug!("Verbose mode enabled");
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(cmd) => execute_command(cmd, &cli.config),
        None => {
            // No command provided - show help hint
            println!("{} ZIA Resource Manager CLI", "zia".green().bold());
            println!();
            println!("Run {} for available commands.", "zia --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, config: &std::path::Path) -> Result<()> {
    match cmd {
        Commands::Apply { check, json } => commands::run_apply(config, check, json),
        Commands::Plan { json } => commands::run_plan(config, json),
        Commands::Get {
            kind,
            id,
            name,
            json,
        } => commands::run_get(config, &kind, id.as_deref(), name.as_deref(), json),
        Commands::Kinds { json } => commands::run_kinds(json),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "zia", &mut io::stdout());
            Ok(())
        }
    }
}
