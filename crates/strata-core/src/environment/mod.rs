//! Environments: which one is active, and what each one resolves to
//!
//! - [`source`] decides the active environment name from an ordered list of
//!   strategies (explicit override, process variable, marker file, fallback).
//! - [`resolver`] expands `"parent : child"` inheritance chains and merges
//!   every declared section into a table of fully resolved environments.

pub mod resolver;
pub mod source;

pub use resolver::{EnvironmentResolver, InheritanceChain, ResolvedEnvironments};
pub use source::{ActiveEnvironment, EnvironmentSource, Variables, determine_environment};
