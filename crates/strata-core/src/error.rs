//! Error types for strata-core

use std::path::PathBuf;

/// Result type for strata-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a settings engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A declaration file is missing, unreadable or malformed
    #[error("Failed to load settings from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    /// The active environment has no declaration
    #[error("Environment '{name}' is not declared (declared: {})", .declared.join(", "))]
    EnvironmentNotDeclared { name: String, declared: Vec<String> },

    /// An environment name encodes an impossible inheritance chain
    #[error("Invalid inheritance chain '{chain}': {reason}")]
    InvalidInheritance { chain: String, reason: String },

    /// Filesystem error from strata-fs
    #[error(transparent)]
    Fs(#[from] strata_fs::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn config_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_inheritance(chain: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInheritance {
            chain: chain.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error means the engine could not be constructed from its
    /// declarations. These are fatal: the process cannot start.
    pub fn is_config_load(&self) -> bool {
        matches!(
            self,
            Self::ConfigLoad { .. } | Self::EnvironmentNotDeclared { .. } | Self::InvalidInheritance { .. }
        )
    }
}
