//! Format detection for structured-text documents

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result};

/// Structured-text formats a configuration source may be written in.
///
/// Detected from the file extension:
/// - `.json` -> JSON
/// - `.toml` -> TOML
/// - anything else (`.yml`, `.yaml`, no extension) -> YAML
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
    Toml,
}

impl DocumentFormat {
    /// Detect the format of a path from its extension.
    pub fn from_path(path: &NormalizedPath) -> Self {
        match path.extension().map(str::to_lowercase).as_deref() {
            Some("json") => Self::Json,
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }

    /// Human-readable format name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
            Self::Toml => "TOML",
        }
    }

    /// Parse `content` read from `path` in this format.
    pub fn parse<T: DeserializeOwned>(self, content: &str, path: &NormalizedPath) -> Result<T> {
        let parsed = match self {
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| Error::Parse {
            path: path.to_native(),
            format: self.name().into(),
            message,
        })
    }

    /// Render `value` in this format for writing to `path`.
    pub fn render<T: Serialize>(self, value: &T, path: &NormalizedPath) -> Result<String> {
        let rendered = match self {
            Self::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
            Self::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
            Self::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
        };
        rendered.map_err(|message| Error::Serialize {
            path: path.to_native(),
            format: self.name().into(),
            message,
        })
    }
}
