//! Strata CLI
//!
//! Inspect resolved settings and manage the settings snapshot.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: could not initialize logging: {}", "warning".yellow(), e);
    }
    tracing::debug!(root = %cli.root.display(), "Starting strata");

    let ctx = Context::new(&cli.root, cli.environment.as_deref(), !cli.no_cache);

    match cli.command {
        Some(cmd) => execute_command(&ctx, cmd),
        None => {
            println!("{} Strata settings CLI", "strata".green().bold());
            println!();
            println!("Run {} for available commands.", "strata --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(ctx: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Get {
            path,
            default,
            json,
        } => commands::run_get(ctx, &path, default.as_deref(), json),
        Commands::Env => commands::run_env(ctx),
        Commands::Show { flat, json } => commands::run_show(ctx, flat, json),
        Commands::Cache { clear } => commands::run_cache(ctx, clear),
    }
}
