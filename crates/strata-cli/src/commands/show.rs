//! Show command implementation

use colored::Colorize;
use strata_core::{Mapping, Value};

use crate::commands::Context;
use crate::error::Result;

/// Display every resolved setting of the active environment.
pub fn run_show(ctx: &Context, flat: bool, json: bool) -> Result<()> {
    let engine = ctx.engine()?;

    if json {
        println!("{}", serde_json::to_string_pretty(engine.settings())?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Environment:".dimmed(),
        engine.environment_name().cyan().bold()
    );
    println!();

    if engine.settings().is_empty() {
        println!("  {}", "(no settings)".dimmed());
        return Ok(());
    }

    if flat {
        for (path, value) in engine.flatten() {
            println!("{} = {}", path.green(), value);
        }
    } else {
        print_tree(engine.settings(), 0);
    }
    Ok(())
}

fn print_tree(mapping: &Mapping, depth: usize) {
    let indent = "  ".repeat(depth);
    for (key, value) in mapping {
        match value {
            Value::Mapping(nested) if !nested.is_empty() => {
                println!("{}{}:", indent, key.bold());
                print_tree(nested, depth + 1);
            }
            leaf => println!("{}{}: {}", indent, key.green(), leaf),
        }
    }
}
