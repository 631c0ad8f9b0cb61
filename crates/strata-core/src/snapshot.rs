//! Snapshot cache for resolved engines
//!
//! A snapshot is a JSON envelope holding the active environment name and the
//! fully resolved settings tree, guarded by a checksum of the tree:
//!
//! ```json
//! {
//!   "format": 1,
//!   "environment": "production",
//!   "checksum": "sha256:...",
//!   "settings": { "...": "..." }
//! }
//! ```
//!
//! JSON has no spelling for infinities or NaN, so non-finite floats are
//! stored as `{"$__strata_float": "inf" | "-inf" | "nan"}` and restored on load.
//!
//! Loading never fails loudly. Anything unexpected (unparseable bytes, another
//! format version, a checksum mismatch) is a cache miss and the caller falls
//! back to resolving from the declaration files.

use crate::engine::ConfigEngine;
use crate::value::{Mapping, Value};
use crate::Result;
use serde::{Deserialize, Serialize};
use strata_fs::checksum::{compute_checksum, verify_checksum};
use strata_fs::{FileAccess, NormalizedPath};

/// Current snapshot layout version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    format: u32,
    environment: String,
    checksum: String,
    settings: Mapping,
}

const NON_FINITE_KEY: &str = "$__strata_float";

/// Serializes resolved engines and restores them without re-resolution.
pub struct SnapshotCache;

impl SnapshotCache {
    /// Serialize `engine` to snapshot bytes.
    pub fn save(engine: &ConfigEngine) -> Result<Vec<u8>> {
        let settings = encode_mapping(engine.settings());
        let canonical = serde_json::to_vec(&settings)?;
        let envelope = Envelope {
            format: FORMAT_VERSION,
            environment: engine.environment_name().to_string(),
            checksum: compute_checksum(&canonical),
            settings,
        };
        Ok(serde_json::to_vec_pretty(&envelope)?)
    }

    /// Restore an engine from snapshot bytes, or `None` on any defect.
    pub fn load(bytes: &[u8]) -> Option<ConfigEngine> {
        let envelope: Envelope = match serde_json::from_slice(bytes) {
            Ok(envelope) => envelope,
            Err(error) => {
                tracing::warn!(%error, "Settings snapshot is unreadable, ignoring it");
                return None;
            }
        };

        if envelope.format != FORMAT_VERSION {
            tracing::warn!(
                found = envelope.format,
                expected = FORMAT_VERSION,
                "Settings snapshot has an unknown format, ignoring it"
            );
            return None;
        }
        if envelope.environment.trim().is_empty() {
            tracing::warn!("Settings snapshot has no environment name, ignoring it");
            return None;
        }

        let canonical = serde_json::to_vec(&envelope.settings).ok()?;
        if !verify_checksum(&canonical, &envelope.checksum) {
            tracing::warn!("Settings snapshot checksum mismatch, ignoring it");
            return None;
        }

        Some(ConfigEngine::from_parts(
            envelope.environment,
            decode_mapping(envelope.settings),
        ))
    }

    /// Write the snapshot of `engine` to `path`.
    pub fn write(fs: &dyn FileAccess, path: &NormalizedPath, engine: &ConfigEngine) -> Result<()> {
        let bytes = Self::save(engine)?;
        fs.write(path, &bytes)?;
        tracing::debug!(%path, bytes = bytes.len(), "Wrote settings snapshot");
        Ok(())
    }

    /// Read the snapshot at `path`. A missing or unreadable file is a miss.
    pub fn read(fs: &dyn FileAccess, path: &NormalizedPath) -> Option<ConfigEngine> {
        if !fs.exists(path) {
            return None;
        }
        match fs.read(path) {
            Ok(bytes) => Self::load(&bytes),
            Err(error) => {
                tracing::warn!(%path, %error, "Settings snapshot could not be read, ignoring it");
                None
            }
        }
    }

    /// Delete the snapshot at `path`, returning whether one existed.
    pub fn clear(fs: &dyn FileAccess, path: &NormalizedPath) -> Result<bool> {
        Ok(fs.remove(path)?)
    }
}

fn encode_mapping(map: &Mapping) -> Mapping {
    map.iter().map(|(key, value)| (key.clone(), encode(value))).collect()
}

fn encode(value: &Value) -> Value {
    match value {
        Value::Float(x) if !x.is_finite() => {
            let spelling = if x.is_nan() {
                "nan"
            } else if x.is_sign_positive() {
                "inf"
            } else {
                "-inf"
            };
            let mut tagged = Mapping::new();
            tagged.insert(NON_FINITE_KEY.to_string(), Value::from(spelling));
            Value::Mapping(tagged)
        }
        Value::Sequence(items) => Value::Sequence(items.iter().map(encode).collect()),
        Value::Mapping(map) => Value::Mapping(encode_mapping(map)),
        other => other.clone(),
    }
}

fn decode_mapping(map: Mapping) -> Mapping {
    map.into_iter().map(|(key, value)| (key, decode(value))).collect()
}

fn decode(value: Value) -> Value {
    match value {
        Value::Mapping(map) => match non_finite(&map) {
            Some(x) => Value::Float(x),
            None => Value::Mapping(decode_mapping(map)),
        },
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(decode).collect()),
        other => other,
    }
}

fn non_finite(map: &Mapping) -> Option<f64> {
    if map.len() != 1 {
        return None;
    }
    match map.get(NON_FINITE_KEY)?.as_str()? {
        "inf" => Some(f64::INFINITY),
        "-inf" => Some(f64::NEG_INFINITY),
        "nan" => Some(f64::NAN),
        _ => None,
    }
}
