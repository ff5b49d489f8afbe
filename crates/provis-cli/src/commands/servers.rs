//! The `servers` command

use colored::Colorize;
use provis_core::targets::parse_criteria;
use provis_core::{Config, Document};
use serde_json::json;

use crate::error::{CliError, Result};

/// List registered servers matching `criteria`
pub fn run_servers(config: &Config, criteria: &str, json: bool) -> Result<()> {
    let criteria = if criteria.trim().is_empty() {
        Document::new()
    } else {
        parse_criteria(criteria)
            .ok_or_else(|| CliError::user(format!("Criteria must be key:value pairs, got '{criteria}'")))?
    };

    let Some(servers) = config.registry().find_servers(&criteria).searched() else {
        if json {
            println!("[]");
        } else {
            println!("{}", "No servers section configured".dimmed());
        }
        return Ok(());
    };

    if json {
        let entries: Vec<_> = servers
            .iter()
            .map(|server| json!({"name": server.name, "config": server.config}))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("{}", "Servers".bold());
    println!();
    if servers.is_empty() {
        println!("  {}", "(none matched)".dimmed());
    }
    for server in &servers {
        let ip = server.ip_address()?.unwrap_or("-");
        println!("  {:<28} {}", server.name.green(), ip);
    }
    Ok(())
}
