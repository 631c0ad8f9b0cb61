//! Well-known locations of settings files relative to the application root.

/// Standard settings file locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrataPath {
    /// Versioned, environment-keyed declaration
    Settings,
    /// Uncommitted local overrides (git-ignored)
    LocalSettings,
    /// Plain-text file naming the active environment
    EnvironmentMarker,
    /// Serialized snapshot of a resolved engine
    SnapshotCache,
}

impl StrataPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Settings => "config/settings.toml",
            Self::LocalSettings => "config/settings.local.toml",
            Self::EnvironmentMarker => "config/environment",
            Self::SnapshotCache => "cache/settings.snapshot.json",
        }
    }
}

/// Process environment variable naming the active environment.
pub const ENVIRONMENT_VARIABLE: &str = "STRATA_ENV";

/// Environment used when nothing else names one.
pub const DEFAULT_ENVIRONMENT: &str = "production";

impl std::fmt::Display for StrataPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
