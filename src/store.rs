use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::HashMap, fs, io, path::PathBuf};

use crate::error::{FocusError, Result};

/// String-valued key/value storage shared by the engine and the shell.
///
/// Methods take `&self`: the store is handed around as `Rc<dyn KeyValueStore>`
/// and is only ever touched from the UI thread.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// One JSON file per key inside a state directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory store, used by the tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and decodes `key`. Storage failures and malformed JSON are logged
/// and reported as "nothing stored".
pub fn load_record<T: for<'de> Deserialize<'de>>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read from storage");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding malformed stored value");
            None
        }
    }
}

/// Encodes and writes `value` under `key`, logging instead of failing.
pub fn save_record<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(FocusError::from)
        .and_then(|json| store.set(key, &json));

    if let Err(e) = result {
        tracing::warn!(key, error = %e, "could not write to storage");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_store_missing_key_is_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("timer-state").unwrap(), None);
    }

    #[test]
    fn file_store_creates_dir_and_reads_back() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("state"));
        store.set("daily-stats", "{\"date\":\"2024-01-01\",\"minutes\":5}").unwrap();
        assert_eq!(
            store.get("daily-stats").unwrap().as_deref(),
            Some("{\"date\":\"2024-01-01\",\"minutes\":5}")
        );
    }

    #[test]
    fn load_record_treats_garbage_as_absent() {
        let store = MemoryStore::new();
        store.set("daily-stats", "not json {").unwrap();
        assert_eq!(load_record::<u32>(&store, "daily-stats"), None);
    }

    #[test]
    fn save_then_load_record() {
        let store = MemoryStore::new();
        save_record(&store, "count", &42u32);
        assert_eq!(load_record::<u32>(&store, "count"), Some(42));
    }
}
