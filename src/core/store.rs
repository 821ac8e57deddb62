//! Persistence port for favorites, recents and theme
//!
//! The session mirrors its state into a string key-value store after every
//! mutation. `RedbStore` keeps it in an embedded database file;
//! `InMemoryStore` backs tests and stands in when the database can't open.

use redb::{Database, TableDefinition};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::shared::errors::{ConvertError, ConvertResult};

pub const FAVORITES_KEY: &str = "favorites";
pub const RECENTS_KEY: &str = "recentConversions";
pub const DARK_MODE_KEY: &str = "isDarkMode";

/// Redb table definition for session state
/// Key: store key, Value: JSON or stringified boolean
const STATE_TABLE: TableDefinition<&str, &str> = TableDefinition::new("session_state");

/// Key -> string mapping that survives restarts
pub trait KeyValueStore: Send + Sync {
    fn read(&self, key: &str) -> ConvertResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> ConvertResult<()>;
}

/// Redb-based store
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    pub fn open(path: &Path) -> ConvertResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;

        // Initialize table so reads never hit a missing table
        let write_txn = db.begin_write()?;
        {
            let _table = write_txn.open_table(STATE_TABLE)?;
        }
        write_txn.commit()?;

        log::info!("[RedbStore] Opened {}", path.display());
        Ok(Self { db })
    }
}

impl KeyValueStore for RedbStore {
    fn read(&self, key: &str) -> ConvertResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STATE_TABLE)?;
        let value = table.get(key)?.map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> ConvertResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(STATE_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

/// In-memory store (tests, and fallback if the database fails to open)
#[derive(Default)]
pub struct InMemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn read(&self, key: &str) -> ConvertResult<Option<String>> {
        let values = self.values.lock()
            .map_err(|e| ConvertError::Storage(format!("Mutex poisoned: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> ConvertResult<()> {
        let mut values = self.values.lock()
            .map_err(|e| ConvertError::Storage(format!("Mutex poisoned: {}", e)))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Open the database at `path`, or fall back to memory if that fails
pub fn open_or_fallback(path: &Path) -> Arc<dyn KeyValueStore> {
    match RedbStore::open(path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            log::warn!("[Store] Failed to open {}: {}, using in-memory fallback", path.display(), e);
            Arc::new(InMemoryStore::new())
        }
    }
}

/// Read a JSON value. Absent, unreadable or malformed data yields the default.
pub fn load_json<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            log::warn!("[Store] Failed to read '{}': {}", key, e);
            return T::default();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        log::warn!("[Store] Ignoring malformed '{}': {}", key, e);
        T::default()
    })
}

pub fn save_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> ConvertResult<()> {
    let serialized = serde_json::to_string(value)?;
    store.write(key, &serialized)
}

/// Stringified boolean; anything but "true" reads as false
pub fn load_flag(store: &dyn KeyValueStore, key: &str) -> bool {
    match store.read(key) {
        Ok(value) => value.as_deref() == Some("true"),
        Err(e) => {
            log::warn!("[Store] Failed to read '{}': {}", key, e);
            false
        }
    }
}

pub fn save_flag(store: &dyn KeyValueStore, key: &str, value: bool) -> ConvertResult<()> {
    store.write(key, if value { "true" } else { "false" })
}
