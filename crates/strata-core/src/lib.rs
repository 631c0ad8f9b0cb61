//! Multi-environment settings resolution for Strata
//!
//! This crate turns a declarative, environment-keyed settings file into one
//! immutable settings tree for the running process:
//!
//! - **Dotted paths**: `database.default.password` addresses nested keys, both
//!   when declaring and when reading settings
//! - **Deep merge**: nested mappings combine key by key, scalars overwrite
//! - **Inheritance**: `"production : development"` defines `development` on
//!   top of a copy of `production`
//! - **Local overrides**: an uncommitted file applied after everything else
//! - **Snapshots**: a resolved engine can be cached to disk and restored
//!   without re-resolution
//!
//! # Example
//!
//! ```no_run
//! use strata_core::{ConfigEngine, Value};
//!
//! let engine = ConfigEngine::from_root("/srv/app")?;
//! let password = engine.get_setting("database.default.password", Value::Null);
//! println!("{} -> {}", engine.environment_name(), password);
//! # Ok::<(), strata_core::Error>(())
//! ```

pub mod declaration;
pub mod engine;
pub mod environment;
pub mod error;
pub mod merge;
pub mod path;
pub mod snapshot;
pub mod value;

pub use declaration::{Declaration, load_overrides};
pub use engine::{ConfigEngine, EngineOptions};
pub use environment::{
    ActiveEnvironment, EnvironmentResolver, EnvironmentSource, InheritanceChain,
    ResolvedEnvironments, Variables, determine_environment,
};
pub use error::{Error, Result};
pub use merge::deep_merge;
pub use path::SettingPath;
pub use snapshot::SnapshotCache;
pub use value::{Mapping, Value, flatten, lookup, mapping};
