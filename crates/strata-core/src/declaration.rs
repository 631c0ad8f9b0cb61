//! Declaration files
//!
//! A primary declaration maps environment names to sections:
//!
//! ```toml
//! [production]
//! debug = false
//! "database.default.password" = "secret"
//!
//! ["production : development"]
//! debug = true
//! ```
//!
//! A local override file is a single, non environment-keyed section applied
//! on top of the resolved active environment.

use crate::value::{Mapping, Value};
use crate::{Error, Result};
use strata_fs::{DocumentFormat, FileAccess, NormalizedPath};

/// Environment sections in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declaration {
    environments: Vec<(String, Mapping)>,
}

impl Declaration {
    /// Read and validate the declaration at `path`.
    ///
    /// A missing or unreadable file, an unsupported extension, a parse error,
    /// or a document that is not a mapping of mappings is a
    /// [`Error::ConfigLoad`].
    pub fn load(fs: &dyn FileAccess, path: &NormalizedPath) -> Result<Self> {
        if !fs.exists(path) {
            return Err(Error::config_load(path.to_native(), "file not found"));
        }
        let document = read_document(fs, path)?;
        Self::from_value(document, path)
    }

    /// Build a declaration from an already parsed document.
    pub fn from_value(document: Value, path: &NormalizedPath) -> Result<Self> {
        let top = match document {
            Value::Mapping(map) => map,
            other => {
                return Err(Error::config_load(
                    path.to_native(),
                    format!("expected a mapping of environments, found {}", other.kind()),
                ));
            }
        };

        let mut environments = Vec::with_capacity(top.len());
        for (name, section) in top {
            let section = match section {
                Value::Mapping(map) => map,
                // `development:` with nothing under it in YAML
                Value::Null => Mapping::new(),
                other => {
                    return Err(Error::config_load(
                        path.to_native(),
                        format!("section '{name}' must be a mapping, found {}", other.kind()),
                    ));
                }
            };
            environments.push((name, section));
        }
        Ok(Self { environments })
    }

    /// Build a declaration directly from `(name, section)` pairs.
    pub fn from_sections<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = (S, Mapping)>,
        S: Into<String>,
    {
        Self {
            environments: sections
                .into_iter()
                .map(|(name, section)| (name.into(), section))
                .collect(),
        }
    }

    /// `(declared name, section)` pairs in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Mapping)> {
        self.environments
            .iter()
            .map(|(name, section)| (name.as_str(), section))
    }

    pub fn len(&self) -> usize {
        self.environments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }
}

/// Load the local override section at `path`, if the file exists.
pub fn load_overrides(fs: &dyn FileAccess, path: &NormalizedPath) -> Result<Option<Mapping>> {
    if !fs.exists(path) {
        tracing::debug!(%path, "No local overrides found, skipping");
        return Ok(None);
    }
    match read_document(fs, path)? {
        Value::Mapping(map) => Ok(Some(map)),
        Value::Null => Ok(Some(Mapping::new())),
        other => Err(Error::config_load(
            path.to_native(),
            format!("local overrides must be a mapping, found {}", other.kind()),
        )),
    }
}

fn read_document(fs: &dyn FileAccess, path: &NormalizedPath) -> Result<Value> {
    let native = path.to_native();
    let format =
        DocumentFormat::from_path(path).map_err(|e| Error::config_load(&native, e.to_string()))?;
    let content = fs
        .read_text(path)
        .map_err(|e| Error::config_load(&native, e.to_string()))?;
    tracing::debug!(%path, %format, "Parsing settings document");
    format
        .parse::<Value>(path, &content)
        .map_err(|e| Error::config_load(&native, e.to_string()))
}
