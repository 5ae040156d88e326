use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Fixed key namespace for every persisted collection.
pub mod keys {
    pub const TESTS: &str = "bel-mini-tests";
    pub const STATS: &str = "bel-mini-stats";
    pub const RULES: &str = "bel-mini-rules";
    pub const RULE_SECTIONS: &str = "bel-mini-rule-sections";
    pub const ACHIEVEMENTS: &str = "bel-mini-achievements";
    pub const METRICS: &str = "bel-mini-metrics";
    pub const USERS: &str = "bel-mini-users";
    pub const AUTH: &str = "bel-mini-auth";
    pub const THEME: &str = "bel-mini-theme";
}

/// Opaque string-keyed persistence capability. Implementations only move raw
/// strings around; all JSON handling lives in [`Storage`].
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// Volatile store for tests and host-embedded use.
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Durable store backed by a single JSON file mapping keys to raw values.
/// Every write flushes synchronously.
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Opens the store, starting empty when the file is missing or does not
    /// parse as a string map.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("store file {} is malformed, starting empty: {err}", path.display());
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Self { path, entries }
    }

    fn flush(&self) {
        match serde_json::to_string_pretty(&self.entries) {
            Ok(raw) => {
                if let Err(err) = fs::write(&self.path, raw) {
                    warn!("failed to persist store to {}: {err}", self.path.display());
                }
            }
            Err(err) => warn!("failed to encode store: {err}"),
        }
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.flush();
    }
}

/// JSON codec over a [`KeyValueStore`]. Absence or a decode failure of any
/// entry falls back to the caller's default instead of propagating an error.
pub struct Storage {
    store: Box<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    pub fn load_or<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.store.read(key) {
            None => fallback,
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    warn!("discarding malformed entry under {key}: {err}");
                    fallback
                }
            },
        }
    }

    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.store.write(key, raw),
            Err(err) => warn!("failed to encode entry under {key}: {err}"),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.store.remove(key);
    }

    /// Raw accessors for entries stored outside the JSON envelope (theme).
    pub fn read_raw(&self, key: &str) -> Option<String> {
        self.store.read(key)
    }

    pub fn write_raw(&mut self, key: &str, value: &str) {
        self.store.write(key, value.to_string());
    }
}
