//! Dotted setting paths
//!
//! `database.default.password` addresses the `password` key inside the
//! `default` mapping inside `database`. There is no escape syntax: a key can
//! never contain a literal `.`.

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// Split a dotted path into its segments.
///
/// Always yields at least one segment; `split("")` is `[""]`.
pub fn split(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).collect()
}

/// A parsed dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingPath<'a> {
    segments: Vec<&'a str>,
}

impl<'a> SettingPath<'a> {
    pub fn parse(path: &'a str) -> Self {
        Self {
            segments: split(path),
        }
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// The key addressed inside the innermost mapping.
    pub fn last_segment(&self) -> &'a str {
        // split() never yields an empty vector
        self.segments.last().copied().unwrap_or_default()
    }

    /// Every segment but the last: the chain of mappings to descend through.
    pub fn parent_segments(&self) -> &[&'a str] {
        &self.segments[..self.segments.len().saturating_sub(1)]
    }
}

impl std::fmt::Display for SettingPath<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
