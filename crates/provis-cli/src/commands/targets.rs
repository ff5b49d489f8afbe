//! The `targets` command

use colored::Colorize;
use provis_core::Config;

use crate::error::Result;

/// Print the addresses a query resolves to, one per line
pub fn run_targets(config: &Config, query: &str, json: bool) -> Result<()> {
    let targets = config.resolve_targets(query)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&targets)?);
        return Ok(());
    }

    if targets.is_empty() {
        eprintln!("{} No targets matched '{}'", "warning:".yellow().bold(), query);
    }
    for ip in targets {
        println!("{ip}");
    }
    Ok(())
}
