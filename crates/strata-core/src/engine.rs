//! The settings engine
//!
//! [`ConfigEngine`] is built once at process start:
//!
//! 1. determine the active environment name,
//! 2. load the primary declaration,
//! 3. resolve every declared environment in file order,
//! 4. select the active environment (absent is fatal),
//! 5. merge the optional local override file on top.
//!
//! After construction the engine is read-only and can be shared freely
//! between threads.

use crate::declaration::{Declaration, load_overrides};
use crate::environment::{
    ActiveEnvironment, EnvironmentResolver, EnvironmentSource, Variables, determine_environment,
};
use crate::merge::merge_into;
use crate::snapshot::SnapshotCache;
use crate::value::{Mapping, Value, flatten, lookup};
use crate::{Error, Result};
use strata_fs::constants::{DEFAULT_ENVIRONMENT, ENVIRONMENT_VARIABLE};
use strata_fs::{FileAccess, LocalFs, NormalizedPath, StrataPath};

/// Where the engine looks for its inputs.
///
/// Relative paths are resolved against [`EngineOptions::root`].
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub root: NormalizedPath,
    pub settings_path: NormalizedPath,
    pub local_path: NormalizedPath,
    pub marker_path: NormalizedPath,
    pub snapshot_path: NormalizedPath,
    pub variable: String,
    pub environment: Option<String>,
    pub fallback_environment: String,
    pub variables: Variables,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            root: NormalizedPath::new("."),
            settings_path: NormalizedPath::new(StrataPath::Settings.as_str()),
            local_path: NormalizedPath::new(StrataPath::LocalSettings.as_str()),
            marker_path: NormalizedPath::new(StrataPath::EnvironmentMarker.as_str()),
            snapshot_path: NormalizedPath::new(StrataPath::SnapshotCache.as_str()),
            variable: ENVIRONMENT_VARIABLE.to_string(),
            environment: None,
            fallback_environment: DEFAULT_ENVIRONMENT.to_string(),
            variables: Variables::Process,
        }
    }
}

impl EngineOptions {
    /// Default layout under `root`.
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Force the active environment, bypassing variable and marker file.
    pub fn with_environment(mut self, name: impl Into<String>) -> Self {
        self.environment = Some(name.into());
        self
    }

    pub fn with_settings_path(mut self, path: impl Into<NormalizedPath>) -> Self {
        self.settings_path = path.into();
        self
    }

    pub fn with_local_path(mut self, path: impl Into<NormalizedPath>) -> Self {
        self.local_path = path.into();
        self
    }

    pub fn with_marker_path(mut self, path: impl Into<NormalizedPath>) -> Self {
        self.marker_path = path.into();
        self
    }

    pub fn with_snapshot_path(mut self, path: impl Into<NormalizedPath>) -> Self {
        self.snapshot_path = path.into();
        self
    }

    /// Name of the process variable consulted for the environment.
    pub fn with_variable(mut self, name: impl Into<String>) -> Self {
        self.variable = name.into();
        self
    }

    pub fn with_fallback_environment(mut self, name: impl Into<String>) -> Self {
        self.fallback_environment = name.into();
        self
    }

    pub fn with_variables(mut self, variables: Variables) -> Self {
        self.variables = variables;
        self
    }

    pub fn settings_file(&self) -> NormalizedPath {
        self.settings_path.resolve_against(&self.root)
    }

    pub fn local_file(&self) -> NormalizedPath {
        self.local_path.resolve_against(&self.root)
    }

    pub fn marker_file(&self) -> NormalizedPath {
        self.marker_path.resolve_against(&self.root)
    }

    pub fn snapshot_file(&self) -> NormalizedPath {
        self.snapshot_path.resolve_against(&self.root)
    }

    /// Environment sources in precedence order.
    pub fn environment_sources(&self) -> Vec<EnvironmentSource> {
        let mut sources = Vec::with_capacity(4);
        if let Some(name) = &self.environment {
            sources.push(EnvironmentSource::Explicit(name.clone()));
        }
        sources.push(EnvironmentSource::Variable(self.variable.clone()));
        sources.push(EnvironmentSource::MarkerFile(self.marker_file()));
        sources.push(EnvironmentSource::Fallback(self.fallback_environment.clone()));
        sources
    }

    /// Determine the active environment for these options.
    pub fn active_environment(&self, fs: &dyn FileAccess) -> ActiveEnvironment {
        determine_environment(&self.environment_sources(), fs, &self.variables).unwrap_or_else(
            || ActiveEnvironment {
                name: DEFAULT_ENVIRONMENT.to_string(),
                source: EnvironmentSource::Fallback(DEFAULT_ENVIRONMENT.to_string()),
            },
        )
    }
}

/// Resolved, read-only settings for one environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEngine {
    environment: String,
    source: EnvironmentSource,
    settings: Mapping,
}

impl ConfigEngine {
    /// Build an engine for the application rooted at `root` using the real
    /// filesystem and the default file layout.
    pub fn from_root(root: impl Into<NormalizedPath>) -> Result<Self> {
        Self::with_options(&LocalFs::new(), &EngineOptions::new(root))
    }

    /// Build an engine from the files described by `options`.
    pub fn with_options(fs: &dyn FileAccess, options: &EngineOptions) -> Result<Self> {
        let active = options.active_environment(fs);
        let declaration = Declaration::load(fs, &options.settings_file())?;
        let mut engine = Self::resolve(&declaration, active)?;

        let local_file = options.local_file();
        if let Some(overrides) = load_overrides(fs, &local_file)? {
            tracing::debug!(path = %local_file, keys = overrides.len(), "Applying local overrides");
            merge_into(&mut engine.settings, &overrides);
        }

        Ok(engine)
    }

    /// Resolve `declaration` for the named environment, with no local overrides.
    pub fn from_declaration(declaration: &Declaration, environment: &str) -> Result<Self> {
        Self::resolve(
            declaration,
            ActiveEnvironment {
                name: environment.to_string(),
                source: EnvironmentSource::Explicit(environment.to_string()),
            },
        )
    }

    fn resolve(declaration: &Declaration, active: ActiveEnvironment) -> Result<Self> {
        let mut resolved = EnvironmentResolver::resolve(declaration.entries())?;
        let settings = resolved
            .take(&active.name)
            .ok_or_else(|| Error::EnvironmentNotDeclared {
                name: active.name.clone(),
                declared: resolved.names(),
            })?;

        tracing::debug!(
            environment = %active.name,
            source = %active.source,
            keys = settings.len(),
            "Selected active environment"
        );

        Ok(Self {
            environment: active.name,
            source: active.source,
            settings,
        })
    }

    /// Rehydrate the engine from its snapshot if possible, otherwise resolve
    /// from source.
    ///
    /// A snapshot written for a different environment than the one currently
    /// determined is treated as a miss.
    pub fn load_cached(fs: &dyn FileAccess, options: &EngineOptions) -> Result<Self> {
        let snapshot_file = options.snapshot_file();
        if let Some(cached) = SnapshotCache::read(fs, &snapshot_file) {
            let active = options.active_environment(fs);
            if cached.environment == active.name {
                tracing::debug!(path = %snapshot_file, "Loaded settings from snapshot");
                return Ok(cached);
            }
            tracing::warn!(
                path = %snapshot_file,
                cached = %cached.environment,
                active = %active.name,
                "Settings snapshot belongs to another environment, re-resolving"
            );
        }
        Self::with_options(fs, options)
    }

    pub(crate) fn from_parts(environment: String, settings: Mapping) -> Self {
        Self {
            environment,
            source: EnvironmentSource::Snapshot,
            settings,
        }
    }

    /// Value at dotted `path`, or `default` if any segment is missing or
    /// an intermediate value is not a mapping.
    pub fn get_setting(&self, path: &str, default: impl Into<Value>) -> Value {
        self.get(path).cloned().unwrap_or_else(|| default.into())
    }

    /// Borrow the value at dotted `path`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.settings, path)
    }

    pub fn has_setting(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn environment_name(&self) -> &str {
        &self.environment
    }

    /// Where the environment name came from.
    pub fn environment_source(&self) -> &EnvironmentSource {
        &self.source
    }

    /// The whole resolved tree.
    pub fn settings(&self) -> &Mapping {
        &self.settings
    }

    /// Every leaf as a `(dotted.path, value)` pair.
    pub fn flatten(&self) -> Vec<(String, &Value)> {
        flatten(&self.settings)
    }
}
