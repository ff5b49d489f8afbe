//! Caller-supplied settings for building the canonical configuration

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Document;

/// Remote working directory used when no source names one
pub const DEFAULT_REMOTE_CHEF_DIR: &str = "/var/chef";

fn default_remote_chef_dir() -> String {
    DEFAULT_REMOTE_CHEF_DIR.to_string()
}

/// A path field that may be given as a single path or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathList {
    One(String),
    Many(Vec<String>),
}

impl Default for PathList {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl PathList {
    /// The paths as a list; a single path becomes a one-element list.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(path) => vec![path.clone()],
            Self::Many(paths) => paths.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Many(paths) if paths.is_empty())
    }
}

impl From<&str> for PathList {
    fn from(path: &str) -> Self {
        Self::One(path.to_string())
    }
}

impl From<String> for PathList {
    fn from(path: String) -> Self {
        Self::One(path)
    }
}

impl<S: Into<String>> From<Vec<S>> for PathList {
    fn from(paths: Vec<S>) -> Self {
        Self::Many(paths.into_iter().map(Into::into).collect())
    }
}

/// Settings for a configuration run.
///
/// `node_attributes` are soft defaults: they are applied to the base
/// document before any source file, so every source can override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Source files, merged in order (later files win)
    #[serde(default)]
    pub yml_files: PathList,

    /// Remote working directory for provisioning runs
    #[serde(default = "default_remote_chef_dir")]
    pub remote_chef_dir: String,

    #[serde(default)]
    pub roles_path: PathList,

    #[serde(default)]
    pub spec_path: PathList,

    #[serde(default)]
    pub cookbook_path: PathList,

    /// Free-form attributes merged in before the source files
    #[serde(default)]
    pub node_attributes: Document,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            yml_files: PathList::default(),
            remote_chef_dir: default_remote_chef_dir(),
            roles_path: PathList::default(),
            spec_path: PathList::default(),
            cookbook_path: PathList::default(),
            node_attributes: Document::new(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn yml_files(mut self, files: impl Into<PathList>) -> Self {
        self.yml_files = files.into();
        self
    }

    pub fn remote_chef_dir(mut self, dir: impl Into<String>) -> Self {
        self.remote_chef_dir = dir.into();
        self
    }

    pub fn roles_path(mut self, paths: impl Into<PathList>) -> Self {
        self.roles_path = paths.into();
        self
    }

    pub fn spec_path(mut self, paths: impl Into<PathList>) -> Self {
        self.spec_path = paths.into();
        self
    }

    pub fn cookbook_path(mut self, paths: impl Into<PathList>) -> Self {
        self.cookbook_path = paths.into();
        self
    }

    pub fn node_attributes(mut self, attributes: Document) -> Self {
        self.node_attributes = attributes;
        self
    }

    pub fn node_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.node_attributes.insert(key, value);
        self
    }

    /// The document every configuration run starts from.
    ///
    /// Path fields are normalized to lists. Node attributes replace base
    /// keys of the same name without recursing.
    pub fn base_document(&self) -> Document {
        let mut base = Document::new();
        base.insert("yml_files", self.yml_files.to_vec());
        base.insert("remote_chef_dir", self.remote_chef_dir.clone());
        base.insert("roles_path", self.roles_path.to_vec());
        base.insert("spec_path", self.spec_path.to_vec());
        base.insert("cookbook_path", self.cookbook_path.to_vec());
        base.merge_shallow(&self.node_attributes);
        base
    }
}
