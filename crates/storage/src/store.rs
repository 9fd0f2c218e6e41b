use std::sync::Arc;

use crate::error::{StorageError, StorageResult};

/// String key/value store holding whole serialized collections.
///
/// Implementations only move opaque text around; encoding and decoding
/// happen in [`crate::snapshot`].
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Write several keys. Backends with transactions override this so the
    /// batch is all-or-nothing.
    fn set_many(&self, entries: &[(&str, String)]) -> StorageResult<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn set_many(&self, entries: &[(&str, String)]) -> StorageResult<()> {
        (**self).set_many(entries)
    }
}

impl<S> KeyValueStore for Box<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn set_many(&self, entries: &[(&str, String)]) -> StorageResult<()> {
        (**self).set_many(entries)
    }
}

/// Keys become file names and SQL parameters; keep them boring.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
