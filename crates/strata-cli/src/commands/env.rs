//! Env command implementation

use colored::Colorize;

use crate::commands::Context;
use crate::error::Result;

/// Print the active environment and the source that named it.
pub fn run_env(ctx: &Context) -> Result<()> {
    let active = ctx.options.active_environment(&ctx.fs);
    println!("{}", active.name.cyan().bold());
    println!("{}: {}", "Source".dimmed(), active.source);
    Ok(())
}
