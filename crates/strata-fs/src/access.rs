//! Injectable file access capability
//!
//! Settings resolution only ever needs to ask whether a file exists, read it,
//! and (for the snapshot cache) write or delete it. [`FileAccess`] captures
//! exactly that surface so the engine can run against the real disk
//! ([`LocalFs`]) or an in-memory tree ([`MemoryFs`]) in tests.

use crate::{Error, NormalizedPath, Result, io};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// File operations required by the settings engine.
pub trait FileAccess: Send + Sync {
    /// Whether a regular file exists at `path`.
    fn exists(&self, path: &NormalizedPath) -> bool;

    /// Read the full contents of the file at `path`.
    fn read(&self, path: &NormalizedPath) -> Result<Vec<u8>>;

    /// Replace the file at `path` with `content`.
    fn write(&self, path: &NormalizedPath, content: &[u8]) -> Result<()>;

    /// Delete the file at `path`, returning whether anything was removed.
    fn remove(&self, path: &NormalizedPath) -> Result<bool>;

    /// Read the file at `path` as UTF-8 text.
    fn read_text(&self, path: &NormalizedPath) -> Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| {
            Error::io(
                path.to_native(),
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })
    }
}

/// [`FileAccess`] backed by the local filesystem.
///
/// Writes go through [`io::write_atomic`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileAccess for LocalFs {
    fn exists(&self, path: &NormalizedPath) -> bool {
        path.is_file()
    }

    fn read(&self, path: &NormalizedPath) -> Result<Vec<u8>> {
        io::read_bytes(path)
    }

    fn write(&self, path: &NormalizedPath, content: &[u8]) -> Result<()> {
        io::write_atomic(path, content)
    }

    fn remove(&self, path: &NormalizedPath) -> Result<bool> {
        io::remove(path)
    }
}

/// In-memory [`FileAccess`] for deterministic tests.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RwLock<BTreeMap<NormalizedPath, Vec<u8>>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper that seeds a file.
    pub fn with_file(self, path: impl Into<NormalizedPath>, content: impl AsRef<[u8]>) -> Self {
        self.insert(path, content);
        self
    }

    /// Seed or replace a file.
    pub fn insert(&self, path: impl Into<NormalizedPath>, content: impl AsRef<[u8]>) {
        let mut files = self.files.write().unwrap_or_else(|e| e.into_inner());
        files.insert(path.into(), content.as_ref().to_vec());
    }
}

impl FileAccess for MemoryFs {
    fn exists(&self, path: &NormalizedPath) -> bool {
        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        files.contains_key(path)
    }

    fn read(&self, path: &NormalizedPath) -> Result<Vec<u8>> {
        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::not_found(path.to_native()))
    }

    fn write(&self, path: &NormalizedPath, content: &[u8]) -> Result<()> {
        self.insert(path.clone(), content);
        Ok(())
    }

    fn remove(&self, path: &NormalizedPath) -> Result<bool> {
        let mut files = self.files.write().unwrap_or_else(|e| e.into_inner());
        Ok(files.remove(path).is_some())
    }
}
