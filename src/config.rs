//! Configuration-value store used to persist logger settings.
//!
//! The logger persists exactly one setting, its verbosity threshold,
//! under the `logger` namespace. The store is a seam: embedders bind
//! whatever backing they already have. Three implementations ship with
//! the crate:
//! - `NoopStore`: remembers nothing; the default binding
//! - `MemoryStore`: in-process map, useful in tests
//! - `JsonFileStore`: one JSON document on disk, shared across runs

use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

/// Namespace the logger writes its settings under.
pub const NAMESPACE: &str = "logger";

/// Key holding the persisted verbosity threshold rank.
pub const LEVEL_KEY: &str = "level";

/// Keyed JSON-value storage grouped by namespace.
///
/// Must be `Send + Sync` so a store can be shared by logbook clones
/// across threads.
pub trait ConfigStore: Send + Sync {
    /// Returns the stored value, or `None` when absent.
    fn get(&self, namespace: &str, key: &str) -> Option<Value>;

    /// Stores a value, replacing any previous one.
    fn set(&self, namespace: &str, key: &str, value: Value) -> Result<()>;
}

/// Store that remembers nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStore;

impl ConfigStore for NoopStore {
    fn get(&self, _namespace: &str, _key: &str) -> Option<Value> {
        None
    }

    fn set(&self, _namespace: &str, _key: &str, _value: Value) -> Result<()> {
        Ok(())
    }
}

/// In-memory store for tests and process-lifetime settings.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<(String, String), Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, namespace: &str, key: &str) -> Option<Value> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values
            .get(&(namespace.to_string(), key.to_string()))
            .cloned()
    }

    fn set(&self, namespace: &str, key: &str, value: Value) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert((namespace.to_string(), key.to_string()), value);
        Ok(())
    }
}

/// Store backed by a single JSON document on disk, shaped as
/// `{namespace: {key: value}}`.
///
/// Reads tolerate a missing or malformed file and report the value as
/// absent; writes re-read the document, merge the new value, and write
/// the whole document back, creating parent directories as needed.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_document(&self) -> HashMap<String, HashMap<String, Value>> {
        if self.path.exists() {
            match fs::read_to_string(&self.path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => HashMap::new(),
            }
        } else {
            HashMap::new()
        }
    }
}

impl ConfigStore for JsonFileStore {
    fn get(&self, namespace: &str, key: &str) -> Option<Value> {
        self.read_document().get(namespace)?.get(key).cloned()
    }

    fn set(&self, namespace: &str, key: &str, value: Value) -> Result<()> {
        let mut document = self.read_document();
        document
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&document)?)?;
        Ok(())
    }
}
