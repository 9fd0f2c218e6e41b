//! `caisse-storage`: persistence boundary.
//!
//! The domain never talks to a database: it hands whole collections to a
//! [`KeyValueStore`] as JSON text keyed by collection name (`products`,
//! `categories`, `sales`) and reads them back the same way at startup.

pub mod error;
pub mod json_dir;
pub mod memory;
pub mod snapshot;
pub mod sqlite;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use json_dir::JsonDirStore;
pub use memory::MemoryStore;
pub use snapshot::{CATEGORIES_KEY, LoadedSnapshot, PRODUCTS_KEY, PosSnapshot, SALES_KEY};
pub use sqlite::SqliteStore;
pub use store::KeyValueStore;
