//! Source and staging paths

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A path stored with forward slashes.
///
/// Source files and staging directories are tracked in this form, which
/// also makes them stable in log output. Conversion back to a native path
/// happens only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: path.as_ref().to_string_lossy().replace('\\', "/"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Platform-native form for I/O
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Append one segment, never doubling the separator
    pub fn join(&self, segment: &str) -> Self {
        let base = self.inner.trim_end_matches('/');
        Self {
            inner: format!("{base}/{}", segment.replace('\\', "/")),
        }
    }

    /// Last path component
    pub fn file_name(&self) -> Option<&str> {
        self.inner
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }

    /// Extension of the file name; dotfiles like `.hidden` have none
    pub fn extension(&self) -> Option<&str> {
        match self.file_name()?.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => Some(ext),
            _ => None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

/// Flatten any number of path lists into absolute paths.
///
/// Relative entries are resolved against the current directory. The paths
/// do not have to exist.
pub fn expand_paths<L, P>(lists: impl IntoIterator<Item = L>) -> Result<Vec<PathBuf>>
where
    L: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    lists
        .into_iter()
        .flatten()
        .map(|path| {
            let path = path.as_ref();
            std::path::absolute(path).map_err(|e| Error::io(path, e))
        })
        .collect()
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
