//! Environment inheritance resolution
//!
//! A declared environment name may encode an inheritance chain:
//! `"production : staging : development"` defines `development`, built from a
//! copy of `production`, then a copy of `staging`, then its own section.
//! Ancestors must be declared before the environments that inherit from them.

use crate::merge::{copy_fields, merge_into};
use crate::value::Mapping;
use crate::{Error, Result};
use indexmap::IndexMap;

/// Separator between names in an inheritance chain.
pub const CHAIN_SEPARATOR: char = ':';

/// A parsed environment name: the environment being defined and its ancestors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritanceChain<'a> {
    parents: Vec<&'a str>,
    base: &'a str,
}

impl<'a> InheritanceChain<'a> {
    /// Parse `"a : b : c"` into parents `[a, b]` and base `c`.
    ///
    /// Fails on empty names and on environments that inherit from themselves.
    pub fn parse(declared: &'a str) -> Result<Self> {
        let mut parts: Vec<&str> = declared.split(CHAIN_SEPARATOR).map(str::trim).collect();
        if parts.iter().any(|part| part.is_empty()) {
            return Err(Error::invalid_inheritance(declared, "empty environment name"));
        }
        // split() always yields at least one part
        let base = parts.pop().unwrap_or_default();
        if parts.contains(&base) {
            return Err(Error::invalid_inheritance(
                declared,
                format!("environment '{base}' inherits from itself"),
            ));
        }
        Ok(Self {
            parents: parts,
            base,
        })
    }

    /// The environment this declaration defines.
    pub fn base(&self) -> &'a str {
        self.base
    }

    /// Ancestors, most distant first.
    pub fn parents(&self) -> &[&'a str] {
        &self.parents
    }
}

/// Builds the table of resolved environments one declaration at a time.
#[derive(Debug, Default)]
pub struct EnvironmentResolver {
    table: IndexMap<String, Mapping>,
}

impl EnvironmentResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every `(name, section)` pair in declaration order.
    pub fn resolve<'a, I>(declarations: I) -> Result<ResolvedEnvironments>
    where
        I: IntoIterator<Item = (&'a str, &'a Mapping)>,
    {
        let mut resolver = Self::new();
        for (name, section) in declarations {
            resolver.declare(name, section)?;
        }
        Ok(resolver.finish())
    }

    /// Apply one declaration on top of the table built so far.
    ///
    /// Declaring the same base name twice merges the later section onto the
    /// earlier result.
    pub fn declare(&mut self, name: &str, section: &Mapping) -> Result<()> {
        let chain = InheritanceChain::parse(name)?;

        // Validate and clone ancestors before touching the slot so a failed
        // declaration leaves the table unchanged
        let mut inherited = Mapping::new();
        for parent in chain.parents() {
            let resolved = self.table.get(*parent).ok_or_else(|| {
                Error::invalid_inheritance(
                    name,
                    format!("ancestor '{parent}' is not declared before '{}'", chain.base()),
                )
            })?;
            copy_fields(&mut inherited, resolved);
        }

        let slot = self.table.entry(chain.base().to_string()).or_default();
        copy_fields(slot, &inherited);
        merge_into(slot, section);

        tracing::debug!(
            environment = chain.base(),
            parents = ?chain.parents(),
            keys = section.len(),
            "Resolved environment declaration"
        );
        Ok(())
    }

    pub fn finish(self) -> ResolvedEnvironments {
        ResolvedEnvironments { table: self.table }
    }
}

/// Fully resolved environments keyed by base name, in first-declared order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedEnvironments {
    table: IndexMap<String, Mapping>,
}

impl ResolvedEnvironments {
    pub fn get(&self, name: &str) -> Option<&Mapping> {
        self.table.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Remove and return one environment, discarding nothing else.
    pub fn take(&mut self, name: &str) -> Option<Mapping> {
        self.table.shift_remove(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.table.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
