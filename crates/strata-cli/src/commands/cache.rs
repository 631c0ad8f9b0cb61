//! Cache command implementation

use colored::Colorize;
use strata_core::{ConfigEngine, SnapshotCache};

use crate::commands::Context;
use crate::error::Result;

/// Write a fresh settings snapshot, or delete the existing one.
pub fn run_cache(ctx: &Context, clear: bool) -> Result<()> {
    let path = ctx.options.snapshot_file();

    if clear {
        if SnapshotCache::clear(&ctx.fs, &path)? {
            println!("{} Removed {}", "-".red(), path);
        } else {
            println!("{} No snapshot at {}", "=".dimmed(), path);
        }
        return Ok(());
    }

    // Resolve from source, never from the existing snapshot
    let engine = ConfigEngine::with_options(&ctx.fs, &ctx.options)?;
    SnapshotCache::write(&ctx.fs, &path, &engine)?;
    println!(
        "{} Cached {} settings for {} at {}",
        "+".green(),
        engine.flatten().len(),
        engine.environment_name().cyan(),
        path
    );
    Ok(())
}
