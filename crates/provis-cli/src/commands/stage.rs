//! The `stage` command

use std::path::Path;

use colored::Colorize;
use provis_core::{Config, Document, SoloRun};

use crate::error::{CliError, Result};

/// Stage a chef-solo run per target under `out/<ip>/`
pub fn run_stage(config: &Config, query: &str, out: &Path, chef_args: Option<&str>) -> Result<()> {
    let targets = config.resolve_targets(query)?;
    if targets.is_empty() {
        return Err(CliError::user(format!("No targets matched '{query}'")));
    }

    for ip in &targets {
        let mut options = Document::new();
        options.insert("ip_address", ip.as_str());
        if let Some(args) = chef_args {
            options.insert("chef_args", args);
        }

        let run = SoloRun::new(config.node_builder().from_options(options)?);
        let dir = out.join(ip);
        let staged = run.stage(&dir)?;
        println!(
            "{} {} ({} files in {})",
            "Staged".green().bold(),
            ip,
            staged.len(),
            dir.display()
        );
    }
    Ok(())
}
