//! Configuration resolution with layered merge
//!
//! The `ConfigResolver` turns [`Settings`] into the canonical [`Config`]:
//! the settings' base document first, then every source file deep-merged
//! on top in order, with later sources overriding earlier ones.

use provis_fs::NormalizedPath;

use super::canonical::Config;
use super::merge::merge;
use super::settings::Settings;
use super::source::SourceLoader;

/// Resolves settings and source files into the canonical configuration
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    settings: Settings,
    loader: SourceLoader,
}

impl ConfigResolver {
    /// Create a resolver that expands source templates from the environment
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            loader: SourceLoader::new(),
        }
    }

    /// Use a specific source loader (for explicit template variables)
    pub fn with_loader(mut self, loader: SourceLoader) -> Self {
        self.loader = loader;
        self
    }

    /// The settings this resolver was created with
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolve the canonical configuration.
    ///
    /// Layers, lowest first:
    /// 1. Base document (normalized path lists, remote dir, node attributes)
    /// 2. Each source file, in the order given
    ///
    /// Sources that are missing or cannot be parsed are skipped, so this
    /// never fails.
    pub fn resolve(&self) -> Config {
        let base = self.settings.base_document();
        let paths: Vec<NormalizedPath> = self
            .settings
            .yml_files
            .to_vec()
            .into_iter()
            .map(NormalizedPath::from)
            .collect();

        let sources = self.loader.load_all(&paths);
        tracing::debug!(
            requested = paths.len(),
            loaded = sources.len(),
            "Merging configuration sources"
        );

        Config::from_document(merge(base, &sources))
    }
}
