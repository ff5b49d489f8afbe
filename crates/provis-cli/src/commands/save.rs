//! The `save-node-json` command

use std::path::Path;

use colored::Colorize;
use provis_core::Config;

use crate::error::Result;

/// Write the canonical configuration to `path`
pub fn run_save_node_json(config: &Config, path: &Path) -> Result<()> {
    config.save_node_json(path)?;
    println!("{} Wrote {}", "OK".green().bold(), path.display());
    Ok(())
}
