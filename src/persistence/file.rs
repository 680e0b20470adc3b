//! JSON file store (native)
//!
//! The whole file is one JSON object of integers. Every write rewrites it via
//! a temp file and rename, so a crash mid-write keeps the previous contents.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StoreError};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, serde_json::Value>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError> {
        match self.read_all()?.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| StoreError::Parse(format!("{key} is not an integer: {value}"))),
        }
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        // An unreadable file is replaced rather than blocking new bests
        let mut values = self.read_all().unwrap_or_else(|err| {
            log::warn!("discarding unreadable {}: {err}", self.path.display());
            BTreeMap::new()
        });
        values.insert(key.to_string(), value.into());

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&values)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_reads_none() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("scores.json"));
        assert_eq!(store.get_int("BEST").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.json");

        let mut store = JsonFileStore::new(&path);
        store.set_int("BEST", 7).unwrap();
        store.set_int("itemBEST", 2).unwrap();
        store.set_int("BEST", 9).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get_int("BEST").unwrap(), Some(9));
        assert_eq!(reopened.get_int("itemBEST").unwrap(), Some(2));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error_then_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(matches!(store.get_int("BEST"), Err(StoreError::Parse(_))));

        store.set_int("BEST", 1).unwrap();
        assert_eq!(store.get_int("BEST").unwrap(), Some(1));
    }

    #[test]
    fn test_non_integer_value_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, r#"{"BEST": "lots"}"#).unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.get_int("BEST"), Err(StoreError::Parse(_))));
    }
}
