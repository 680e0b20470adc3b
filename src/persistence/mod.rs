//! Key/value persistence for best scores
//!
//! Stores hold named integers. Writes are durable by the time `set_int`
//! returns. Backends:
//! - [`MemoryStore`] for tests and throwaway sessions
//! - [`JsonFileStore`] (native) rewrites one JSON object file per write
//! - `LocalStorageStore` (wasm32, see `platform::web`)

use std::collections::BTreeMap;
use std::fmt;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;

/// Errors surfaced by a store backend
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Parse(String),
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "store i/o error: {err}"),
            Self::Parse(msg) => write!(f, "store contents unreadable: {msg}"),
            Self::Unavailable(msg) => write!(f, "store unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Named integer storage
pub trait KeyValueStore {
    /// `Ok(None)` when the key has never been written
    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError>;

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError> {
        (**self).get_int(key)
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        (**self).set_int(key, value)
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store
    pub fn with_values<'a>(values: impl IntoIterator<Item = (&'a str, i64)>) -> Self {
        Self {
            values: values.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
