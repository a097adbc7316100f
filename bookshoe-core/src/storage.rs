//! Key/value persistence of settings records.
//!
//! Reads never fail: anything missing or undecodable falls back to the
//! caller's default. Writes log their failures instead of returning them.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::shoe::Variant;

/// Persistence key of the selected variant
pub const VARIANT_KEY: &str = "helperType";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("settings storage is unavailable")]
    Unavailable,

    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
}

/// String storage keyed by record name
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store for tests and headless use
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read a record, laying the stored fields over `default`.
///
/// The merge is shallow: a stored top-level field replaces the default's
/// field whole. Absent, malformed or mistyped records yield `default`.
pub fn load<T, S>(store: &S, key: &str, default: T) -> T
where
    T: Serialize + DeserializeOwned,
    S: SettingsStore + ?Sized,
{
    let Some(raw) = store.get(key) else {
        return default;
    };

    match merge_over(&raw, &default) {
        Ok(value) => value,
        Err(err) => {
            warn!(key, %err, "stored settings are unreadable, using defaults");
            default
        }
    }
}

fn merge_over<T>(raw: &str, default: &T) -> Result<T, serde_json::Error>
where
    T: Serialize + DeserializeOwned,
{
    let stored: Value = serde_json::from_str(raw)?;

    let merged = match (serde_json::to_value(default)?, stored) {
        (Value::Object(mut base), Value::Object(fields)) => {
            base.extend(fields);
            Value::Object(base)
        }
        (_, other) => other,
    };

    serde_json::from_value(merged)
}

/// Write a record; failures are logged and dropped
pub fn store<T, S>(store: &mut S, key: &str, value: &T)
where
    T: Serialize + ?Sized,
    S: SettingsStore + ?Sized,
{
    let text = match serde_json::to_string(value) {
        Ok(text) => text,
        Err(err) => {
            warn!(key, %err, "failed to encode settings");
            return;
        }
    };

    if let Err(err) = store.set(key, &text) {
        warn!(key, %err, "failed to persist settings");
    }
}

/// Selected variant, or the default when absent or unknown
pub fn load_variant<S: SettingsStore + ?Sized>(store: &S) -> Variant {
    load(store, VARIANT_KEY, Variant::default())
}

pub fn store_variant<S: SettingsStore + ?Sized>(store: &mut S, variant: Variant) {
    self::store(store, VARIANT_KEY, &variant);
}
