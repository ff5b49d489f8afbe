//! Filesystem helpers for provis
//!
//! Provides normalized paths, structured-text format detection and
//! atomic writes used by the configuration engine.

pub mod error;
pub mod format;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use format::DocumentFormat;
pub use path::{NormalizedPath, expand_paths};
