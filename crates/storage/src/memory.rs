use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{StorageError, StorageResult};
use crate::store::{KeyValueStore, validate_key};

/// In-memory store for tests/dev. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StorageError {
    StorageError::backend("memory store lock poisoned")
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.remove(key);
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> StorageResult<()> {
        for (key, _) in entries {
            validate_key(key)?;
        }
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }
}
