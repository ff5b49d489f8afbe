//! Loading configuration sources
//!
//! Sources are template-expanded structured-text files. A source that cannot
//! be read or parsed contributes nothing rather than failing the load, since
//! not every invocation needs every file to exist.

use provis_fs::{DocumentFormat, NormalizedPath, io};
use serde_json::Value;

use super::template::TemplateVars;
use crate::document::Document;
use crate::error::{Error, Result};

/// Reads and parses an ordered list of configuration sources.
#[derive(Debug, Clone, Default)]
pub struct SourceLoader {
    vars: TemplateVars,
}

impl SourceLoader {
    /// Create a loader that expands variables from the process environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with explicit template variables
    pub fn with_vars(vars: TemplateVars) -> Self {
        Self { vars }
    }

    /// Load every source in order, skipping the ones that cannot be used.
    ///
    /// The result keeps the relative order of the sources that did load.
    /// Missing, unreadable, unparseable and empty sources are skipped.
    pub fn load_all<'a>(&self, paths: impl IntoIterator<Item = &'a NormalizedPath>) -> Vec<Document> {
        let mut documents = Vec::new();
        for path in paths {
            match self.load(path) {
                Ok(Some(document)) => {
                    tracing::debug!(%path, keys = document.len(), "Loaded configuration source");
                    documents.push(document);
                }
                Ok(None) => {
                    tracing::debug!(%path, "Configuration source is empty, skipping");
                }
                Err(Error::Fs(provis_fs::Error::Io { source, .. })) => {
                    tracing::debug!(%path, error = %source, "Configuration source not readable, skipping");
                }
                Err(e) => {
                    tracing::warn!(%path, error = %e, "Configuration source not usable, skipping");
                }
            }
        }
        documents
    }

    /// Load a single source, propagating any failure.
    ///
    /// Returns `Ok(None)` when the source parses to an empty document.
    pub fn load(&self, path: &NormalizedPath) -> Result<Option<Document>> {
        let raw = io::read_text(path)?;
        let expanded = self.vars.expand(&raw);
        if expanded.trim().is_empty() {
            return Ok(None);
        }

        let value: Value = DocumentFormat::from_path(path).parse(&expanded, path)?;
        let document = Document::from_value(value)?;
        if document.is_empty() {
            return Ok(None);
        }
        Ok(Some(document))
    }
}
