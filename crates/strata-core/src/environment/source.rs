//! Active environment determination
//!
//! The active environment is chosen by the first [`EnvironmentSource`] that
//! yields a non-empty name. The engine uses, in order: an explicit override,
//! the `STRATA_ENV` process variable, the `config/environment` marker file,
//! and finally the literal `production`.

use std::collections::HashMap;
use strata_fs::{FileAccess, NormalizedPath};

/// Where process environment variables are read from.
///
/// `Fixed` lets tests pin variables without touching the real process
/// environment.
#[derive(Debug, Clone, Default)]
pub enum Variables {
    #[default]
    Process,
    Fixed(HashMap<String, String>),
}

impl Variables {
    pub fn fixed<K, V, I>(vars: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Fixed(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// No variables at all.
    pub fn empty() -> Self {
        Self::Fixed(HashMap::new())
    }

    pub fn get(&self, name: &str) -> Option<String> {
        match self {
            Self::Process => std::env::var(name).ok(),
            Self::Fixed(vars) => vars.get(name).cloned(),
        }
    }
}

/// One strategy for naming the active environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentSource {
    /// A name supplied by the caller
    Explicit(String),
    /// A process environment variable
    Variable(String),
    /// A plain-text file whose trimmed content is the name
    MarkerFile(NormalizedPath),
    /// A hardcoded name, always available
    Fallback(String),
    /// Restored from a settings snapshot
    Snapshot,
}

impl EnvironmentSource {
    /// Ask this source for a name. Blank values count as absent.
    pub fn probe(&self, fs: &dyn FileAccess, vars: &Variables) -> Option<String> {
        let raw = match self {
            Self::Explicit(name) | Self::Fallback(name) => Some(name.clone()),
            Self::Variable(var) => vars.get(var),
            Self::MarkerFile(path) => read_marker(fs, path),
            Self::Snapshot => None,
        }?;
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

fn read_marker(fs: &dyn FileAccess, path: &NormalizedPath) -> Option<String> {
    if !fs.exists(path) {
        return None;
    }
    match fs.read_text(path) {
        Ok(text) => Some(text),
        Err(error) => {
            tracing::warn!(%path, %error, "Environment marker file is unreadable, ignoring it");
            None
        }
    }
}

impl std::fmt::Display for EnvironmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit(_) => f.write_str("explicit override"),
            Self::Variable(var) => write!(f, "environment variable {var}"),
            Self::MarkerFile(path) => write!(f, "marker file {path}"),
            Self::Fallback(_) => f.write_str("default"),
            Self::Snapshot => f.write_str("settings snapshot"),
        }
    }
}

/// The chosen environment name and the source that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEnvironment {
    pub name: String,
    pub source: EnvironmentSource,
}

/// Probe `sources` in order and return the first name found.
///
/// Returns `None` only if no source (not even a fallback) produced a name.
pub fn determine_environment(
    sources: &[EnvironmentSource],
    fs: &dyn FileAccess,
    vars: &Variables,
) -> Option<ActiveEnvironment> {
    sources.iter().find_map(|source| {
        source.probe(fs, vars).map(|name| {
            tracing::debug!(environment = %name, %source, "Determined active environment");
            ActiveEnvironment {
                name,
                source: source.clone(),
            }
        })
    })
}
