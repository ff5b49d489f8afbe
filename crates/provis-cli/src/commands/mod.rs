//! Command implementations for provis-cli

pub mod bootstrap;
pub mod node;
pub mod save;
pub mod servers;
pub mod stage;
pub mod targets;

pub use bootstrap::run_bootstrap_plan;
pub use node::run_node;
pub use save::run_save_node_json;
pub use servers::run_servers;
pub use stage::run_stage;
pub use targets::run_targets;

use provis_core::config::{ConfigResolver, Settings};
use provis_core::{Config, Document};
use serde_json::Value;

use crate::cli::ConfigArgs;

/// Resolve the canonical configuration from the global arguments
pub fn load_config(args: &ConfigArgs) -> Config {
    let mut settings = Settings::new()
        .yml_files(args.yml_files.clone())
        .roles_path(args.roles_path.clone())
        .spec_path(args.spec_path.clone())
        .cookbook_path(args.cookbook_path.clone())
        .node_attributes(key_values(&args.attributes));
    if let Some(dir) = &args.remote_chef_dir {
        settings = settings.remote_chef_dir(dir.clone());
    }
    ConfigResolver::new(settings).resolve()
}

/// Build a document from `key=value` pairs.
///
/// Values that parse as JSON keep their type (`count=3`, `quiet=true`);
/// everything else is a plain string.
pub fn key_values(pairs: &[(String, String)]) -> Document {
    pairs
        .iter()
        .map(|(key, raw)| {
            let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw.as_str()));
            (key.clone(), value)
        })
        .collect()
}

/// Join positional query tokens back into one query string
pub fn join_query(tokens: &[String]) -> String {
    tokens.join(" ")
}
