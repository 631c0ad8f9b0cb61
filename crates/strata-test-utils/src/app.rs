//! [`TestApp`] builder for settings resolution scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary application root with helpers for writing settings files and
/// asserting on what the engine leaves behind.
///
/// # Example
///
/// ```rust,no_run
/// use strata_test_utils::TestApp;
///
/// let app = TestApp::new()
///     .settings("[production]\ndebug = false\n")
///     .marker("production");
/// assert!(app.path("config/settings.toml").is_file());
/// ```
pub struct TestApp {
    temp_dir: TempDir,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Create an empty temporary application root.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("TestApp::new: failed to create temp dir"),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` under the root.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Could not create directory {}: {e}", parent.display())
            });
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {e}", full_path.display()));
    }

    /// Write the primary declaration `config/settings.toml`.
    pub fn settings(self, toml: &str) -> Self {
        self.write("config/settings.toml", toml);
        self
    }

    /// Write the local override file `config/settings.local.toml`.
    pub fn local(self, toml: &str) -> Self {
        self.write("config/settings.local.toml", toml);
        self
    }

    /// Write the environment marker file `config/environment`.
    pub fn marker(self, environment: &str) -> Self {
        self.write("config/environment", &format!("{environment}\n"));
        self
    }

    pub fn assert_file_not_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(!full_path.exists(), "{} should be absent", full_path.display());
    }

    /// # Panics
    /// Panics if the file is unreadable or lacks `needle`.
    pub fn assert_file_contains(&self, relative: &str, needle: &str) {
        let full_path = self.path(relative);
        let text = fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("Could not read {}: {e}", full_path.display()));
        assert!(
            text.contains(needle),
            "{} lacks {needle:?}:\n{text}",
            full_path.display()
        );
    }
}
