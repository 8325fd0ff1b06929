//! redb-backed durable key-value store
//!
//! The single persistence primitive of the client: drafts, the local
//! record fallback and the pending basic-info slot all live here under
//! distinct keys. Values are JSON.
//!
//! The plain accessors ([`DurableStore::read`], [`DurableStore::write`],
//! [`DurableStore::remove`]) never fail: corrupt or missing values read as
//! the caller's default and write failures are logged and dropped. Callers
//! that cannot afford to lose a write use the `try_*` variants.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Key-value table: key = storage key, value = JSON
const KV_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable local store
#[derive(Clone)]
pub struct DurableStore {
    db: Arc<Database>,
}

impl std::fmt::Debug for DurableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DurableStore").finish_non_exhaustive()
    }
}

impl DurableStore {
    /// Open or create the store file
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory store (tests, ephemeral sessions)
    pub fn in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StoreResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(KV_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    // ========== Infallible API ==========

    /// Read `key`, falling back to `default` when missing or unreadable
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.read_opt(key).unwrap_or(default)
    }

    /// Read `key`; missing and unreadable values are both `None`
    pub fn read_opt<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_read(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Error reading from durable store");
                None
            }
        }
    }

    /// Write `value` under `key`; failures are logged, never returned
    pub fn write<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_write(key, value) {
            tracing::error!(key = %key, error = %e, "Error writing to durable store");
        }
    }

    /// Remove `key`; failures are logged, never returned
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.try_remove(key) {
            tracing::error!(key = %key, error = %e, "Error removing from durable store");
        }
    }

    // ========== Fallible API ==========

    pub fn try_read<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(KV_TABLE)?;

        match table.get(key)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn try_write<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let bytes = serde_json::to_vec(value)?;
        self.put_raw(key, &bytes)
    }

    pub fn try_remove(&self, key: &str) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Store raw bytes without serialization
    pub(crate) fn put_raw(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.insert(key, bytes)?;
        }
        write_txn.commit()?;
        tracing::debug!(key = %key, len = bytes.len(), "Durable store write");
        Ok(())
    }

    /// All keys currently stored, in key order
    pub fn keys(&self) -> Vec<String> {
        let collect = || -> StoreResult<Vec<String>> {
            let read_txn = self.db.begin_read()?;
            let table = read_txn.open_table(KV_TABLE)?;
            let mut keys = Vec::new();
            for entry in table.iter()? {
                let (key, _) = entry?;
                keys.push(key.value().to_string());
            }
            Ok(keys)
        };

        collect().unwrap_or_else(|e| {
            tracing::error!(error = %e, "Error listing durable store keys");
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_write_then_read() {
        let store = DurableStore::in_memory().unwrap();
        let value = Sample {
            name: "a".into(),
            count: 3,
        };
        store.write("sample", &value);
        assert_eq!(store.read_opt::<Sample>("sample"), Some(value));
    }

    #[test]
    fn test_missing_key_returns_default() {
        let store = DurableStore::in_memory().unwrap();
        let v: Vec<u32> = store.read("nothing", vec![1, 2]);
        assert_eq!(v, vec![1, 2]);
    }

    #[test]
    fn test_corrupt_value_returns_default() {
        let store = DurableStore::in_memory().unwrap();
        store.put_raw("broken", b"{not json").unwrap();
        let v: Vec<u32> = store.read("broken", Vec::new());
        assert!(v.is_empty());
        assert!(store.try_read::<Vec<u32>>("broken").is_err());
    }

    #[test]
    fn test_wrong_shape_returns_default() {
        let store = DurableStore::in_memory().unwrap();
        store.write("n", &42u32);
        assert_eq!(store.read::<String>("n", "fallback".into()), "fallback");
    }

    #[test]
    fn test_remove() {
        let store = DurableStore::in_memory().unwrap();
        store.write("k", &1u8);
        store.remove("k");
        assert_eq!(store.read_opt::<u8>("k"), None);
        // removing again is a no-op
        store.remove("k");
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_keys() {
        let store = DurableStore::in_memory().unwrap();
        store.write("b", &1u8);
        store.write("a", &2u8);
        assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.redb");
        {
            let store = DurableStore::open(&path).unwrap();
            store.write("draft_admin", &"kept".to_string());
        }
        let store = DurableStore::open(&path).unwrap();
        assert_eq!(store.read_opt::<String>("draft_admin").as_deref(), Some("kept"));
    }

    #[test]
    fn test_clones_share_data() {
        let store = DurableStore::in_memory().unwrap();
        let other = store.clone();
        store.write("k", &7u8);
        assert_eq!(other.read_opt::<u8>("k"), Some(7));
    }
}
