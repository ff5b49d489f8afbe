//! Server registry over the `servers` section
//!
//! Every lookup distinguishes "there is no `servers` section at all" from
//! "there is a section and nothing matched". The target resolver falls
//! back differently in the two cases, so [`Lookup`] keeps them apart.

use serde_json::{Map, Value};

use crate::document::{Document, value_kind};
use crate::error::Result;

/// Key of the server section in the canonical document
pub const SERVERS_KEY: &str = "servers";

/// A named server entry, copied out of the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Server {
    pub name: String,
    pub config: Document,
}

impl Server {
    /// The entry's `ip_address` attribute
    pub fn ip_address(&self) -> Result<Option<&str>> {
        self.config.get_str("ip_address")
    }
}

/// Outcome of a registry search
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// No `servers` section is configured
    NoRegistry,
    /// The section exists and was searched
    Searched(T),
}

impl<T> Lookup<T> {
    pub fn is_no_registry(&self) -> bool {
        matches!(self, Self::NoRegistry)
    }

    /// The search result, or `None` when there was nothing to search
    pub fn searched(self) -> Option<T> {
        match self {
            Self::NoRegistry => None,
            Self::Searched(found) => Some(found),
        }
    }
}

/// Read-only view of the servers declared in a document.
#[derive(Debug, Clone, Copy)]
pub struct ServerRegistry<'a> {
    section: Option<&'a Map<String, Value>>,
}

impl<'a> ServerRegistry<'a> {
    /// View the `servers` section of `document`.
    ///
    /// A null or non-mapping section counts as no registry.
    pub fn new(document: &'a Document) -> Self {
        let section = match document.get(SERVERS_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map),
            Some(other) => {
                tracing::warn!(
                    found = value_kind(other),
                    "'servers' is not a mapping, ignoring server registry"
                );
                None
            }
        };
        Self { section }
    }

    /// Whether a `servers` section is configured
    pub fn is_configured(&self) -> bool {
        self.section.is_some()
    }

    /// Every declared server in declaration order, or `None` without a registry
    pub fn servers(&self) -> Option<Vec<Server>> {
        self.section.map(|_| self.entries().map(to_server).collect())
    }

    /// All servers whose attributes equal every criterion.
    ///
    /// Empty criteria match every server. Matching is exact equality; a
    /// criterion with a null value matches servers that lack the key.
    pub fn find_servers(&self, criteria: &Document) -> Lookup<Vec<Server>> {
        if self.section.is_none() {
            return Lookup::NoRegistry;
        }
        Lookup::Searched(
            self.entries()
                .filter(|(_, entry)| matches(entry, criteria))
                .map(to_server)
                .collect(),
        )
    }

    /// The first server, in declaration order, matching every criterion
    pub fn find_server(&self, criteria: &Document) -> Lookup<Option<Server>> {
        if self.section.is_none() {
            return Lookup::NoRegistry;
        }
        Lookup::Searched(
            self.entries()
                .find(|(_, entry)| matches(entry, criteria))
                .map(to_server),
        )
    }

    /// Attributes of the first matching server
    pub fn find_server_config(&self, criteria: &Document) -> Option<Document> {
        self.find_server(criteria)
            .searched()
            .flatten()
            .map(|server| server.config)
    }

    /// Attributes of the server declared under `name`
    pub fn find_server_config_by_name(&self, name: &str) -> Option<Document> {
        match self.section?.get(name)? {
            Value::Object(entry) => Some(Document::from(entry.clone())),
            _ => None,
        }
    }

    // Non-mapping entries cannot carry attributes and are left out
    fn entries(&self) -> impl Iterator<Item = (&'a String, &'a Map<String, Value>)> {
        self.section
            .into_iter()
            .flat_map(|section| section.iter())
            .filter_map(|(name, entry)| match entry {
                Value::Object(map) => Some((name, map)),
                other => {
                    tracing::debug!(server = %name, found = value_kind(other), "Skipping non-mapping server entry");
                    None
                }
            })
    }
}

fn matches(entry: &Map<String, Value>, criteria: &Document) -> bool {
    criteria
        .iter()
        .all(|(key, expected)| entry.get(key).unwrap_or(&Value::Null) == expected)
}

fn to_server((name, entry): (&String, &Map<String, Value>)) -> Server {
    Server {
        name: name.clone(),
        config: Document::from(entry.clone()),
    }
}
