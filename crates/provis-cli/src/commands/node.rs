//! The `node` command

use provis_core::{Config, Document};

use crate::error::{CliError, Result};

use super::key_values;

/// Options assembled from the `node` command line
#[derive(Debug, Default)]
pub struct NodeArgs<'a> {
    pub target: Option<&'a str>,
    pub options: Option<&'a str>,
    pub set: &'a [(String, String)],
    pub chef_args: Option<&'a str>,
    pub quiet: bool,
}

impl NodeArgs<'_> {
    /// Merge the command line into one options document.
    ///
    /// Later sources win: `--options`, then the target, then `--set`, then
    /// the control flags.
    pub fn to_options(&self) -> Result<Document> {
        let mut options = match self.options {
            Some(encoded) => {
                let value: serde_json::Value = serde_json::from_str(encoded)?;
                Document::from_value(value)
                    .map_err(|_| CliError::user("--options must be a JSON object"))?
            }
            None => Document::new(),
        };
        if let Some(ip) = self.target {
            options.insert("ip_address", ip);
        }
        options.merge_shallow(&key_values(self.set));
        if let Some(args) = self.chef_args {
            options.insert("chef_args", args);
        }
        if self.quiet {
            options.insert("quiet", true);
        }
        Ok(options)
    }
}

/// Print the node configuration for the given arguments as JSON
pub fn run_node(config: &Config, args: &NodeArgs<'_>) -> Result<()> {
    let run = config.node_builder().from_options(args.to_options()?)?;
    tracing::debug!(chef_args = ?run.chef_args, quiet = run.quiet, "Built node run");
    println!("{}", run.config.to_json_pretty()?);
    Ok(())
}
