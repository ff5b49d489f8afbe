//! Variable expansion applied to source text before parsing
//!
//! Supported forms:
//! - `${NAME}` is replaced with the variable's value, or nothing when unset
//! - `${NAME:-fallback}` uses `fallback` when the variable is unset
//! - `$$` is a literal `$`

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static VARIABLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\$|\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").unwrap()
});

/// Variables available to template expansion.
///
/// Explicit variables shadow the process environment.
#[derive(Debug, Clone)]
pub struct TemplateVars {
    vars: HashMap<String, String>,
    use_env: bool,
}

impl Default for TemplateVars {
    fn default() -> Self {
        Self {
            vars: HashMap::new(),
            use_env: true,
        }
    }
}

impl TemplateVars {
    /// Variables resolved from the process environment
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Only the explicitly provided variables; the environment is ignored.
    pub fn isolated() -> Self {
        Self {
            vars: HashMap::new(),
            use_env: false,
        }
    }

    /// Add or replace an explicit variable
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Look up a variable
    pub fn lookup(&self, name: &str) -> Option<String> {
        if let Some(value) = self.vars.get(name) {
            return Some(value.clone());
        }
        if self.use_env {
            return std::env::var(name).ok();
        }
        None
    }

    /// Expand every variable reference in `input`
    pub fn expand(&self, input: &str) -> String {
        VARIABLE_PATTERN
            .replace_all(input, |caps: &Captures<'_>| {
                let Some(name) = caps.get(1) else {
                    return "$".to_string();
                };
                match self.lookup(name.as_str()) {
                    Some(value) => value,
                    None => match caps.get(2) {
                        Some(fallback) => fallback.as_str().to_string(),
                        None => {
                            tracing::debug!(variable = name.as_str(), "Template variable is unset");
                            String::new()
                        }
                    },
                }
            })
            .into_owned()
    }
}
