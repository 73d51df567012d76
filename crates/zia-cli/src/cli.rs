//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use zia_core::config::DEFAULT_MANIFEST;

/// ZIA Resource Manager - Reconcile ZIA resources against a declared manifest
#[derive(Parser, Debug)]
#[command(name = "zia")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Manifest listing the desired resources
    #[arg(short, long, global = true, env = "ZIA_CONFIG", default_value = DEFAULT_MANIFEST)]
    pub config: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Reconcile every manifest entry against the store
    ///
    /// Examples:
    ///   zia apply                  # Create, update or delete as declared
    ///   zia apply --check          # Report what would change
    ///   zia apply -c prod.toml --json
    Apply {
        /// Decide actions without changing anything
        #[arg(long)]
        check: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Preview what apply would change, with a field diff per resource
    Plan {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Look up existing resources of one kind
    ///
    /// Without --id or --name every resource of the kind is listed.
    Get {
        /// Resource kind (use 'zia kinds' to see options)
        kind: String,

        /// Remote-assigned id
        #[arg(long, conflicts_with = "name")]
        id: Option<String>,

        /// Resource name
        #[arg(long)]
        name: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List the known resource kinds
    Kinds {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Whether failures should be reported as JSON
    pub fn json(&self) -> bool {
        match self {
            Commands::Apply { json, .. }
            | Commands::Plan { json }
            | Commands::Get { json, .. }
            | Commands::Kinds { json } => *json,
            Commands::Completions { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_apply_check_json() {
        let cli = Cli::parse_from(["zia", "apply", "--check", "--json"]);
        assert_eq!(
            cli.command,
            Some(Commands::Apply {
                check: true,
                json: true
            })
        );
        assert_eq!(cli.config, PathBuf::from("zia.toml"));
    }

    #[test]
    fn parse_global_config_after_subcommand() {
        let cli = Cli::parse_from(["zia", "plan", "-c", "prod.toml"]);
        assert_eq!(cli.config, PathBuf::from("prod.toml"));
        assert!(matches!(cli.command, Some(Commands::Plan { json: false })));
    }

    #[test]
    fn parse_get_by_name() {
        let cli = Cli::parse_from(["zia", "get", "dlp_engine", "--name", "PCI"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Get { ref kind, ref name, id: None, json: false })
                if kind == "dlp_engine" && name.as_deref() == Some("PCI")
        ));
    }

    #[test]
    fn get_rejects_id_and_name_together() {
        let result = Cli::try_parse_from(["zia", "get", "zpa_gateway", "--id", "1", "--name", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_completions_command() {
        let cli = Cli::parse_from(["zia", "completions", "bash"]);
        assert!(matches!(cli.command, Some(Commands::Completions { .. })));
    }
}
