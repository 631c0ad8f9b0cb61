//! Atomic, lock-guarded writes and plain reads on the local filesystem

use crate::{Error, NormalizedPath, Result};
use fs2::FileExt;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Replace the file at `path` with `content` without exposing a partial file.
///
/// Content is written to a uniquely named sibling temp file under an exclusive
/// advisory lock, synced, then renamed over the destination. Concurrent
/// writers never share a temp file. A failed write leaves the destination
/// untouched and the temp file is removed when dropped.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let destination = path.to_native();
    // Same directory as the destination so the rename never crosses filesystems
    let dir = match destination.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;

    let name = destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut staging = tempfile::Builder::new()
        .prefix(&format!(".{name}."))
        .suffix(".tmp")
        .tempfile_in(&dir)
        .map_err(|e| Error::io(&dir, e))?;

    let staging_path = staging.path().to_path_buf();
    write_locked(staging.as_file_mut(), &staging_path, &destination, content)?;
    staging
        .persist(&destination)
        .map_err(|e| Error::io(&destination, e.error))?;

    tracing::trace!(path = %path, bytes = content.len(), "Wrote file atomically");
    Ok(())
}

fn write_locked(file: &mut File, staging: &Path, destination: &Path, content: &[u8]) -> Result<()> {
    let lock_failed = |_| Error::LockFailed {
        path: destination.to_path_buf(),
    };

    file.lock_exclusive().map_err(lock_failed)?;
    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| Error::io(staging, e))?;
    FileExt::unlock(&*file).map_err(lock_failed)
}

pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native = path.to_native();
    fs::read_to_string(&native).map_err(|e| Error::io(native, e))
}

pub fn read_bytes(path: &NormalizedPath) -> Result<Vec<u8>> {
    let native = path.to_native();
    fs::read(&native).map_err(|e| Error::io(native, e))
}

/// Delete the file at `path`, returning whether one existed.
pub fn remove(path: &NormalizedPath) -> Result<bool> {
    let native = path.to_native();
    match fs::remove_file(&native) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(native, e)),
    }
}
