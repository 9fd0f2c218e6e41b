//! Encoding of the three persisted collections.
//!
//! Loading is strict: a value that is present but does not decode fails with
//! [`StorageError::Corrupt`] naming the collection, and is never silently
//! replaced. Only a *missing* key falls back to defaults.

use serde::Serialize;
use serde::de::DeserializeOwned;

use caisse_catalog::{Category, Product};
use caisse_sales::Sale;

use crate::error::{StorageError, StorageResult};
use crate::store::KeyValueStore;

pub const PRODUCTS_KEY: &str = "products";
pub const CATEGORIES_KEY: &str = "categories";
pub const SALES_KEY: &str = "sales";

/// Everything the application persists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PosSnapshot {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    /// Newest first.
    pub sales: Vec<Sale>,
}

/// Result of a load: each collection is `None` when never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedSnapshot {
    pub products: Option<Vec<Product>>,
    pub categories: Option<Vec<Category>>,
    pub sales: Option<Vec<Sale>>,
}

impl LoadedSnapshot {
    /// True when nothing has ever been stored (first launch).
    pub fn is_fresh(&self) -> bool {
        self.products.is_none() && self.categories.is_none() && self.sales.is_none()
    }

    /// Fill each missing collection independently from `defaults`.
    pub fn or_defaults(self, defaults: PosSnapshot) -> PosSnapshot {
        PosSnapshot {
            products: self.products.unwrap_or(defaults.products),
            categories: self.categories.unwrap_or(defaults.categories),
            sales: self.sales.unwrap_or(defaults.sales),
        }
    }
}

impl PosSnapshot {
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> StorageResult<LoadedSnapshot> {
        let loaded = LoadedSnapshot {
            products: load_collection(store, PRODUCTS_KEY)?,
            categories: load_collection(store, CATEGORIES_KEY)?,
            sales: load_collection(store, SALES_KEY)?,
        };
        tracing::debug!(
            products = loaded.products.as_ref().map(Vec::len),
            categories = loaded.categories.as_ref().map(Vec::len),
            sales = loaded.sales.as_ref().map(Vec::len),
            "loaded persisted collections"
        );
        Ok(loaded)
    }

    /// Write all three collections in one batch.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &S) -> StorageResult<()> {
        let entries = [
            (PRODUCTS_KEY, encode(PRODUCTS_KEY, &self.products)?),
            (CATEGORIES_KEY, encode(CATEGORIES_KEY, &self.categories)?),
            (SALES_KEY, encode(SALES_KEY, &self.sales)?),
        ];
        store.set_many(&entries)?;
        tracing::debug!(
            products = self.products.len(),
            categories = self.categories.len(),
            sales = self.sales.len(),
            "saved collections"
        );
        Ok(())
    }
}

pub fn load_collection<T, S>(store: &S, key: &str) -> StorageResult<Option<Vec<T>>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(text) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| StorageError::Corrupt {
            key: key.to_string(),
            source,
        })
}

pub fn save_collection<T, S>(store: &S, key: &str, items: &[T]) -> StorageResult<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    store.set(key, &encode(key, items)?)
}

fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> StorageResult<String> {
    serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })
}
