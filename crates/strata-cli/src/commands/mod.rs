//! Command implementations for strata-cli

pub mod cache;
pub mod env;
pub mod get;
pub mod show;

pub use cache::run_cache;
pub use env::run_env;
pub use get::run_get;
pub use show::run_show;

use std::path::Path;

use strata_core::{ConfigEngine, EngineOptions};
use strata_fs::LocalFs;

use crate::error::Result;

/// Shared state for every command: where the application lives and how to
/// build its engine.
pub struct Context {
    pub fs: LocalFs,
    pub options: EngineOptions,
    pub use_cache: bool,
}

impl Context {
    pub fn new(root: &Path, environment: Option<&str>, use_cache: bool) -> Self {
        let mut options = EngineOptions::new(root.to_path_buf());
        if let Some(name) = environment {
            options = options.with_environment(name);
        }
        Self {
            fs: LocalFs::new(),
            options,
            use_cache,
        }
    }

    /// Build the engine, going through the snapshot unless disabled.
    pub fn engine(&self) -> Result<ConfigEngine> {
        let engine = if self.use_cache {
            ConfigEngine::load_cached(&self.fs, &self.options)?
        } else {
            ConfigEngine::with_options(&self.fs, &self.options)?
        };
        Ok(engine)
    }
}
