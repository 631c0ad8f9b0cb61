//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strata - resolve multi-environment application settings
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Application root containing config/settings.toml
    #[arg(short, long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Force the active environment
    #[arg(short = 'e', long = "env", global = true)]
    pub environment: Option<String>,

    /// Ignore any settings snapshot and resolve from source
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the value of one setting
    ///
    /// Exits with an error when the setting is absent and no --default is
    /// given, so scripts can tell a missing key from an explicit null.
    ///
    /// Examples:
    ///   strata get database.default.host
    ///   strata get cache.ttl --default 60
    Get {
        /// Dotted path of the setting
        path: String,

        /// Value printed when the setting is absent (parsed as JSON if possible)
        #[arg(short, long)]
        default: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the active environment and where it came from
    Env,

    /// Show every resolved setting
    Show {
        /// One `dotted.path = value` line per setting
        #[arg(long)]
        flat: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the settings snapshot, or delete it with --clear
    Cache {
        /// Delete the snapshot instead of writing it
        #[arg(long)]
        clear: bool,
    },
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
    fn parse_get_with_default() {
        let cli = Cli::parse_from(["strata", "get", "cache.ttl", "--default", "60"]);
        assert_eq!(
            cli.command,
            Some(Commands::Get {
                path: "cache.ttl".into(),
                default: Some("60".into()),
                json: false,
            })
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["strata", "show", "--env", "development", "--root", "/srv/app"]);
        assert_eq!(cli.environment.as_deref(), Some("development"));
        assert_eq!(cli.root, PathBuf::from("/srv/app"));
    }
}
