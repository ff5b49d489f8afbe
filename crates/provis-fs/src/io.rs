//! Atomic writes for node JSON and staged run files

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Write `content` to `path` so readers never see a partial file.
///
/// The content goes to a locked sibling temp file which is synced and then
/// renamed over the target. Missing parent directories are created.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let target = path.to_native();
    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_path = temp_sibling(&target);
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    if let Err(e) = fill_locked(&mut temp_file, &temp_path, &target, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, &target).map_err(|e| Error::io(&target, e))?;
    tracing::debug!(path = %path, bytes = content.len(), "Wrote file atomically");
    Ok(())
}

// Same directory keeps the rename on one filesystem
fn temp_sibling(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

fn fill_locked(file: &mut File, temp_path: &Path, target: &Path, content: &[u8]) -> Result<()> {
    let lock_failed = || Error::LockFailed {
        path: target.to_path_buf(),
    };

    file.lock_exclusive().map_err(|_| lock_failed())?;
    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| Error::io(temp_path, e))?;
    file.unlock().map_err(|_| lock_failed())
}

/// Read a whole text file
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native = path.to_native();
    fs::read_to_string(&native).map_err(|e| Error::io(&native, e))
}

/// [`write_atomic`] for text
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
