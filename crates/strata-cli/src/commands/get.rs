//! Get command implementation

use strata_core::Value;

use crate::commands::Context;
use crate::error::{CliError, Result};

/// Print one setting, or `default` if it is absent.
pub fn run_get(ctx: &Context, path: &str, default: Option<&str>, json: bool) -> Result<()> {
    let engine = ctx.engine()?;

    let value = match (engine.get(path), default) {
        (Some(value), _) => value.clone(),
        (None, Some(raw)) => parse_default(raw),
        (None, None) => {
            return Err(CliError::user(format!(
                "Setting '{}' is not defined in environment '{}'",
                path,
                engine.environment_name()
            )));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", value);
    }
    Ok(())
}

/// Command-line defaults are JSON when they parse as JSON, plain strings otherwise.
fn parse_default(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw))
}
