use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// SQLite-backed key-value store.
///
/// Values are opaque text; callers JSON-encode structured values and use
/// decimal text for counters. A missing key is `None`, never an error.
pub struct KvStore {
    conn: Mutex<Connection>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Malformed value under key {key}: {reason}")]
    Malformed { key: String, reason: String },
}

impl KvStore {
    /// Open (and create if needed) the store at `database_url`, accepting
    /// an optional `sqlite:` prefix. `:memory:` is supported for tests.
    pub fn open(database_url: &str) -> Result<Self, StoreError> {
        let path = database_url.strip_prefix("sqlite:").unwrap_or(database_url);

        if path != ":memory:" {
            if let Some(parent) = Path::new(path).parent() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
            }
        }

        let conn = Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::info!("Key-value store opened: {}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
            row.get(0)
        })
        .optional()
        .map_err(|e| StoreError::Database(e.to_string()))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    /// Read a JSON-encoded value.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StoreError::Malformed {
                    key: key.to_string(),
                    reason: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Write a value as JSON.
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::Malformed {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        self.set(key, &raw)
    }

    /// Read a decimal-text counter, defaulting to 0 when the key is
    /// missing or the value does not parse.
    pub fn counter(&self, key: &str) -> Result<u64, StoreError> {
        Ok(self
            .get(key)?
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0))
    }

    pub fn set_counter(&self, key: &str, value: u64) -> Result<(), StoreError> {
        self.set(key, &value.to_string())
    }

    pub fn increment_counter(&self, key: &str, by: u64) -> Result<u64, StoreError> {
        let value = self.counter(key)? + by;
        self.set_counter(key, value)?;
        Ok(value)
    }
}
