//! Per-node configuration for a provisioning run
//!
//! A node configuration layers, lowest first:
//!
//! 1. The canonical document
//! 2. The registered server whose `ip_address` equals the target, if any
//! 3. The caller's options
//!
//! Two control options, `chef_args` and `quiet`, are execution parameters
//! of the run. They are held aside on [`NodeRun`] and never appear inside
//! the node document.

use serde_json::Value;

use crate::config::Config;
use crate::document::{Document, value_kind};
use crate::error::{Error, Result};

/// Option key carrying extra arguments for the provisioner
pub const CHEF_ARGS_KEY: &str = "chef_args";

/// Option key silencing run output
pub const QUIET_KEY: &str = "quiet";

/// The result of building a node configuration
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRun {
    /// Extra provisioner arguments, never merged into `config`
    pub chef_args: Option<String>,
    /// Whether the run should be quiet, never merged into `config`
    pub quiet: bool,
    /// The merged node document, owned by this run
    pub config: Document,
}

impl NodeRun {
    /// The address this run targets
    pub fn ip_address(&self) -> Result<Option<&str>> {
        self.config.get_str("ip_address")
    }

    /// Remote working directory for this run
    pub fn remote_chef_dir(&self) -> Result<&str> {
        Ok(self
            .config
            .get_str("remote_chef_dir")?
            .unwrap_or(crate::config::DEFAULT_REMOTE_CHEF_DIR))
    }
}

/// Builds [`NodeRun`]s from the canonical configuration
#[derive(Debug, Clone, Copy)]
pub struct NodeBuilder<'a> {
    config: &'a Config,
}

impl<'a> NodeBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Build the configuration for a bare IP address
    pub fn for_ip(&self, ip_address: &str) -> Result<NodeRun> {
        let mut options = Document::new();
        options.insert("ip_address", ip_address);
        self.build(options)
    }

    /// Build from caller options
    pub fn from_options(&self, options: Document) -> Result<NodeRun> {
        self.build(options)
    }

    /// Build from JSON-encoded options, which must decode to a mapping
    pub fn from_encoded(&self, encoded: &str) -> Result<NodeRun> {
        let value: Value = serde_json::from_str(encoded)?;
        match value {
            Value::Object(map) => self.build(Document::from(map)),
            other => Err(Error::InvalidOptions {
                message: format!("expected a JSON object, found {}", value_kind(&other)),
            }),
        }
    }

    fn build(&self, mut options: Document) -> Result<NodeRun> {
        let chef_args = take_string(&mut options, CHEF_ARGS_KEY)?;
        let quiet = take_bool(&mut options, QUIET_KEY)?.unwrap_or(false);

        let server = match options.get_str("ip_address")? {
            Some(ip_address) => {
                let criteria: Document = [("ip_address", ip_address)].into_iter().collect();
                self.config.registry().find_server_config(&criteria)
            }
            None => None,
        };
        tracing::debug!(
            matched_server = server.is_some(),
            overrides = options.len(),
            "Building node configuration"
        );

        let mut config = self.config.document().clone();
        if let Some(server) = &server {
            config.merge(server);
        }
        config.merge(&options);

        Ok(NodeRun {
            chef_args,
            quiet,
            config,
        })
    }
}

fn take_string(options: &mut Document, key: &str) -> Result<Option<String>> {
    match options.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(Error::WrongShape {
            key: key.to_string(),
            expected: "string",
            found: value_kind(&other),
        }),
    }
}

fn take_bool(options: &mut Document, key: &str) -> Result<Option<bool>> {
    match options.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(other) => Err(Error::WrongShape {
            key: key.to_string(),
            expected: "boolean",
            found: value_kind(&other),
        }),
    }
}
