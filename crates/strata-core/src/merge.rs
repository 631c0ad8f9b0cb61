//! Recursive merging of settings trees
//!
//! Override keys may be dotted: `"a.b.c" = 1` is merged exactly like
//! `a = { b = { c = 1 } }`. Overrides are applied in order, so a later key can
//! extend a mapping created by an earlier key of the same override set.
//!
//! Conflicts between shapes are settled by the override:
//! - a mapping overriding a scalar replaces the scalar with the mapping
//!   (promotion), then merges into it;
//! - a scalar (or sequence) overriding a mapping replaces the whole subtree
//!   (demotion).

use crate::path::SettingPath;
use crate::value::{Mapping, Value};

/// Merge `overrides` on top of a copy of `base`.
///
/// `base` is left untouched.
pub fn deep_merge(base: &Mapping, overrides: &Mapping) -> Mapping {
    let mut merged = base.clone();
    merge_into(&mut merged, overrides);
    merged
}

/// Merge `overrides` into `target` in place.
pub fn merge_into(target: &mut Mapping, overrides: &Mapping) {
    for (key, value) in overrides {
        let path = SettingPath::parse(key);
        let parent = descend_mut(target, path.parent_segments());
        let leaf = path.last_segment();

        match value {
            Value::Mapping(nested) => {
                let slot = parent.entry(leaf.to_string()).or_insert_with(Value::mapping);
                merge_into(ensure_mapping(slot), nested);
            }
            other => {
                if let Some(Value::Mapping(existing)) = parent.get(leaf) {
                    if !existing.is_empty() {
                        // Kept for compatibility; usually a typo in the declaration
                        tracing::debug!(
                            key = %key,
                            replacement = other.kind(),
                            "Mapping replaced by a non-mapping value"
                        );
                    }
                }
                parent.insert(leaf.to_string(), other.clone());
            }
        }
    }
}

/// Walk `segments` down from `node`, creating (or promoting) mappings on the way.
fn descend_mut<'a>(mut node: &'a mut Mapping, segments: &[&str]) -> &'a mut Mapping {
    for segment in segments {
        let slot = node
            .entry((*segment).to_string())
            .or_insert_with(Value::mapping);
        node = ensure_mapping(slot);
    }
    node
}

/// Turn `slot` into a mapping if it is not one already, discarding any scalar.
fn ensure_mapping(slot: &mut Value) -> &mut Mapping {
    match slot {
        Value::Mapping(map) => map,
        other => {
            *other = Value::mapping();
            ensure_mapping(other)
        }
    }
}

/// Overwrite `target`'s top-level keys with clones of `source`'s entries.
///
/// This is a shallow copy: nested mappings in `source` replace, rather than
/// merge with, those already in `target`.
pub fn copy_fields(target: &mut Mapping, source: &Mapping) {
    for (key, value) in source {
        target.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::mapping;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> Mapping {
        match serde_json::from_str::<Value>(json).unwrap() {
            Value::Mapping(map) => map,
            other => panic!("expected mapping, got {other:?}"),
        }
    }

    #[test]
    fn dotted_keys_expand_into_nested_mappings() {
        let merged = deep_merge(
            &Mapping::new(),
            &parse(r#"{"database.default.password": "secret"}"#),
        );
        assert_eq!(
            merged,
            parse(r#"{"database": {"default": {"password": "secret"}}}"#)
        );
    }

    #[test]
    fn nested_objects_merge_field_by_field() {
        let base = parse(r#"{"a": 1, "b": {"x": 10, "y": 20}}"#);
        let overrides = parse(r#"{"b": {"y": 25, "z": 30}, "c": 3}"#);

        let merged = deep_merge(&base, &overrides);

        assert_eq!(
            merged,
            parse(r#"{"a": 1, "b": {"x": 10, "y": 25, "z": 30}, "c": 3}"#)
        );
    }

    #[test]
    fn base_is_not_mutated() {
        let base = parse(r#"{"a": {"b": 1}}"#);
        let snapshot = base.clone();
        let _ = deep_merge(&base, &parse(r#"{"a.b": 2}"#));
        assert_eq!(base, snapshot);
    }

    #[test]
    fn later_keys_extend_mappings_from_earlier_keys() {
        let merged = deep_merge(
            &Mapping::new(),
            &parse(r#"{"a.b.c": 1, "a": {"b": {"d": 2}}}"#),
        );
        assert_eq!(merged, parse(r#"{"a": {"b": {"c": 1, "d": 2}}}"#));
    }

    #[test]
    fn nested_override_keys_may_be_dotted() {
        let base = parse(r#"{"log": {"file": {"path": "/var/log/app.log", "level": "info"}}}"#);
        let merged = deep_merge(&base, &parse(r#"{"log": {"file.level": "debug"}}"#));
        assert_eq!(
            merged,
            parse(r#"{"log": {"file": {"path": "/var/log/app.log", "level": "debug"}}}"#)
        );
    }

    #[test]
    fn mapping_promotes_scalar() {
        let base = parse(r#"{"cache": "off"}"#);
        let merged = deep_merge(&base, &parse(r#"{"cache": {"driver": "redis"}}"#));
        assert_eq!(merged, parse(r#"{"cache": {"driver": "redis"}}"#));
    }

    #[test]
    fn dotted_key_promotes_scalar_intermediate() {
        let base = parse(r#"{"cache": "off"}"#);
        let merged = deep_merge(&base, &parse(r#"{"cache.driver": "redis"}"#));
        assert_eq!(merged, parse(r#"{"cache": {"driver": "redis"}}"#));
    }

    #[test]
    fn dotted_key_promotes_every_scalar_level() {
        let base = parse(r#"{"cache": "off", "queue": [1, 2]}"#);
        let merged = deep_merge(&base, &parse(r#"{"cache.redis.port": 6379, "queue.driver": "sqs"}"#));
        assert_eq!(
            merged,
            parse(r#"{"cache": {"redis": {"port": 6379}}, "queue": {"driver": "sqs"}}"#)
        );
    }

    #[test]
    fn scalar_demotes_mapping() {
        let base = parse(r#"{"featureflags": {"beta": true, "search": false}}"#);
        let merged = deep_merge(&base, &parse(r#"{"featureflags": ""}"#));
        assert_eq!(merged, parse(r#"{"featureflags": ""}"#));
    }

    #[test]
    fn sequences_replace_rather_than_merge() {
        let base = parse(r#"{"hosts": ["a", "b", "c"]}"#);
        let merged = deep_merge(&base, &parse(r#"{"hosts": ["d"]}"#));
        assert_eq!(merged, parse(r#"{"hosts": ["d"]}"#));
    }

    #[test]
    fn empty_override_mapping_keeps_existing_subtree() {
        let base = parse(r#"{"a": {"b": 1}}"#);
        let merged = deep_merge(&base, &parse(r#"{"a": {}}"#));
        assert_eq!(merged, base);
    }

    #[test]
    fn copy_fields_is_shallow() {
        let mut target = parse(r#"{"a": {"x": 1}, "keep": true}"#);
        copy_fields(&mut target, &parse(r#"{"a": {"y": 2}}"#));
        assert_eq!(target, parse(r#"{"a": {"y": 2}, "keep": true}"#));
    }

    #[test]
    fn mapping_helper_builds_overrides() {
        let merged = deep_merge(&Mapping::new(), &mapping([("x.y", 1)]));
        assert_eq!(merged, parse(r#"{"x": {"y": 1}}"#));
    }
}
