//! Locating the shared chef fixtures.

use std::path::PathBuf;

/// The `test-fixtures/chef` directory at the workspace root.
///
/// # Panics
/// Panics if the directory is missing, which means the crate is being used
/// outside this workspace.
pub fn fixtures_dir() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/chef");
    assert!(dir.is_dir(), "Fixture directory not found: {}", dir.display());
    dir
}

/// Path to one fixture file, e.g. `chef_fixture("chef.yml")`.
pub fn chef_fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Paths to several fixture files, in the given order.
pub fn fixture_paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|name| chef_fixture(name)).collect()
}
