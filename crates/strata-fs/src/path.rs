//! Slash-separated paths for settings file locations

use std::fmt;
use std::path::{Path, PathBuf};

/// A path stored in one canonical, forward-slash spelling.
///
/// Settings locations are configured as plain strings (`config/settings.toml`)
/// and compared as map keys by [`crate::MemoryFs`], so backslashes, `.`
/// segments and repeated separators are folded away on construction. The
/// native `PathBuf` is only produced at the I/O boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: normalize(&path.as_ref().to_string_lossy()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Append `segment` below this path.
    pub fn join(&self, segment: &str) -> Self {
        Self {
            inner: normalize(&format!("{}/{segment}", self.inner)),
        }
    }

    /// Resolve this path against `root` unless it is already absolute.
    pub fn resolve_against(&self, root: &NormalizedPath) -> Self {
        if self.is_absolute() {
            self.clone()
        } else {
            root.join(&self.inner)
        }
    }

    /// `/srv/app` and `C:/app` are absolute.
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/')
            || matches!(self.inner.as_bytes(), [drive, b':', b'/', ..] if drive.is_ascii_alphabetic())
    }

    pub fn parent(&self) -> Option<Self> {
        let parent = match self.inner.rsplit_once('/')? {
            (_, "") => return None,
            ("", _) => "/",
            (head, _) => head,
        };
        Some(Self {
            inner: parent.to_string(),
        })
    }

    pub fn file_name(&self) -> Option<&str> {
        self.inner
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty() && *name != ".")
    }

    /// Extension of the file name; dot-files such as `.env` have none.
    pub fn extension(&self) -> Option<&str> {
        let (stem, extension) = self.file_name()?.rsplit_once('.')?;
        (!stem.is_empty()).then_some(extension)
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

fn normalize(raw: &str) -> String {
    let unified = raw.replace('\\', "/");
    let segments: Vec<&str> = unified
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    if unified.starts_with('/') {
        format!("/{}", segments.join("/"))
    } else if segments.is_empty() {
        ".".to_string()
    } else {
        segments.join("/")
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for NormalizedPath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_onto_current_dir_drops_dot() {
        let root = NormalizedPath::new(".");
        assert_eq!(root.join("config/settings.toml").as_str(), "config/settings.toml");
    }

    #[test]
    fn empty_path_is_current_dir() {
        assert_eq!(NormalizedPath::new("").as_str(), ".");
        assert_eq!(NormalizedPath::new("./.").as_str(), ".");
    }

    #[test]
    fn resolve_keeps_absolute_paths() {
        let root = NormalizedPath::new("/srv/app");
        let abs = NormalizedPath::new("/etc/strata/settings.toml");
        assert_eq!(abs.resolve_against(&root), abs);

        let rel = NormalizedPath::new("config/settings.toml");
        assert_eq!(rel.resolve_against(&root).as_str(), "/srv/app/config/settings.toml");
    }

    #[test]
    fn windows_drive_paths_are_absolute() {
        assert!(NormalizedPath::new("C:\\app\\config").is_absolute());
        assert!(!NormalizedPath::new("config\\settings.toml").is_absolute());
    }
}
