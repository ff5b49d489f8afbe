//! The canonical configuration handle

use std::path::Path;

use provis_fs::{NormalizedPath, io};
use serde_json::Value;

use super::settings::DEFAULT_REMOTE_CHEF_DIR;
use crate::document::Document;
use crate::error::Result;
use crate::node::NodeBuilder;
use crate::registry::ServerRegistry;
use crate::targets;

/// The merged configuration for one provisioning invocation.
///
/// A `Config` is never mutated after construction; producing a new merge
/// means building a new handle, and "resetting" means replacing it with
/// [`Config::empty`]. Per-node documents are built from independent copies
/// so they can never alias this one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    document: Document,
}

impl Config {
    /// An empty configuration: no servers, no addresses, no paths
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap an already-merged document
    pub fn from_document(document: Document) -> Self {
        Self { document }
    }

    /// Load the configuration from a single JSON document.
    ///
    /// Unlike layered sources, a node JSON file is required: read and parse
    /// failures are returned.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = NormalizedPath::new(path);
        let content = io::read_text(&path)?;
        let value: Value = serde_json::from_str(&content)?;
        tracing::debug!(%path, "Loaded node JSON configuration");
        Ok(Self::from_document(Document::from_value(value)?))
    }

    /// The full merged document
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn to_json(&self) -> Result<String> {
        self.document.to_json()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        self.document.to_json_pretty()
    }

    /// Top-level `ip_address`, used when a query names no target
    pub fn ip_address(&self) -> Result<Option<&str>> {
        self.document.get_str("ip_address")
    }

    /// Remote working directory, `/var/chef` unless configured
    pub fn remote_chef_dir(&self) -> Result<&str> {
        Ok(self
            .document
            .get_str("remote_chef_dir")?
            .unwrap_or(DEFAULT_REMOTE_CHEF_DIR))
    }

    pub fn yml_files(&self) -> Result<Vec<String>> {
        self.document.get_string_list("yml_files")
    }

    pub fn roles_path(&self) -> Result<Vec<String>> {
        self.document.get_string_list("roles_path")
    }

    pub fn spec_path(&self) -> Result<Vec<String>> {
        self.document.get_string_list("spec_path")
    }

    pub fn cookbook_path(&self) -> Result<Vec<String>> {
        self.document.get_string_list("cookbook_path")
    }

    /// The `cloud_config` section, if declared
    pub fn cloud_config(&self) -> Result<Option<Document>> {
        self.document.get_document("cloud_config")
    }

    /// The `bootstrap` section, if declared
    pub fn bootstrap(&self) -> Result<Option<Document>> {
        self.document.get_document("bootstrap")
    }

    /// Write the canonical document as indented JSON to `path`.
    ///
    /// Parent directories are created as needed.
    pub fn save_node_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = NormalizedPath::new(path);
        io::write_text(&path, &self.to_json_pretty()?)?;
        tracing::debug!(%path, "Saved node JSON");
        Ok(())
    }

    /// Server lookups against this configuration
    pub fn registry(&self) -> ServerRegistry<'_> {
        ServerRegistry::new(&self.document)
    }

    /// Resolve a target query to IP addresses
    pub fn resolve_targets(&self, query: &str) -> Result<Vec<String>> {
        targets::resolve_targets(self, query)
    }

    /// Per-node configuration builder
    pub fn node_builder(&self) -> NodeBuilder<'_> {
        NodeBuilder::new(self)
    }
}
