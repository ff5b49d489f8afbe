//! The `bootstrap-plan` command

use colored::Colorize;
use provis_core::{Bootstrap, Config, Document};

use crate::error::Result;

/// Print the bootstrap commands for `ip` without running them
pub fn run_bootstrap_plan(
    config: &Config,
    ip: &str,
    ruby_version: Option<&str>,
    json: bool,
) -> Result<()> {
    let mut overrides = Document::new();
    overrides.insert("ip_address", ip);
    if let Some(version) = ruby_version {
        overrides.insert("ruby_version", version);
    }

    let bootstrap = Bootstrap::resolve(config, &overrides)?;
    let commands = bootstrap.remote_commands()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&commands)?);
        return Ok(());
    }

    println!(
        "{} {} (ruby {})",
        "Bootstrap plan for".bold(),
        ip.cyan(),
        bootstrap.ruby_version
    );
    for (step, command) in commands.iter().enumerate() {
        println!("  {:>2}. {}", step + 1, command);
    }
    Ok(())
}
