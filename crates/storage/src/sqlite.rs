//! SQLite-backed key/value store (desktop persistence).

use std::path::Path;
use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use tokio::runtime::{Builder, Runtime};

use crate::error::{StorageError, StorageResult};
use crate::store::{KeyValueStore, validate_key};

/// One `kv` table, one row per collection.
///
/// The store owns a current-thread Tokio runtime and blocks on every call, so
/// callers see a plain synchronous API. Do not call it from inside another
/// Tokio runtime.
#[derive(Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
    runtime: Runtime,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        tracing::debug!(path = %path.display(), "opening sqlite store");
        Self::connect(options)
    }

    /// Private in-memory database (tests/dev).
    pub fn in_memory() -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        Self::connect(options)
    }

    fn connect(options: SqliteConnectOptions) -> StorageResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StorageError::backend(format!("failed to build runtime: {e}")))?;

        // A single long-lived connection: writes are serialized and an
        // in-memory database lives exactly as long as the store.
        let pool = runtime.block_on(async {
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?;

            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS kv (
                    key        TEXT NOT NULL PRIMARY KEY,
                    value      TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                )
                "#,
            )
            .execute(&pool)
            .await?;

            Ok::<_, sqlx::Error>(pool)
        })?;

        Ok(Self { pool, runtime })
    }
}

impl Drop for SqliteStore {
    fn drop(&mut self) {
        self.runtime.block_on(self.pool.close());
    }
}

const UPSERT: &str = r#"
    INSERT INTO kv (key, value, updated_at)
    VALUES (?1, ?2, ?3)
    ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at
"#;

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        let row = self.runtime.block_on(
            sqlx::query("SELECT value FROM kv WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool),
        )?;

        match row {
            Some(row) => Ok(Some(row.try_get::<String, _>("value")?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        let now = Utc::now().to_rfc3339();
        self.runtime.block_on(
            sqlx::query(UPSERT)
                .bind(key)
                .bind(value)
                .bind(now)
                .execute(&self.pool),
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.runtime.block_on(
            sqlx::query("DELETE FROM kv WHERE key = ?1")
                .bind(key)
                .execute(&self.pool),
        )?;
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> StorageResult<()> {
        for (key, _) in entries {
            validate_key(key)?;
        }
        let now = Utc::now().to_rfc3339();

        self.runtime.block_on(async {
            let mut tx = self.pool.begin().await?;
            for (key, value) in entries {
                sqlx::query(UPSERT)
                    .bind(*key)
                    .bind(value.as_str())
                    .bind(now.as_str())
                    .execute(&mut *tx)
                    .await?;
            }
            tx.commit().await
        })?;
        Ok(())
    }
}
