use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use redb::{Database, ReadableTable, TableDefinition};
use tracing::debug;

use crate::shared::error::{AppError, AppResult};
use crate::shared::settings::AppSettings;

/// Key: storage key, Value: raw string value
const LOCAL_STORAGE_TABLE: TableDefinition<&str, &str> = TableDefinition::new("local_storage");

pub const USER_ID_KEY: &str = "toma_user_id";
pub const LAST_FEEDBACK_KEY: &str = "toma_last_feedback";

/// Client-local string key/value persistence.
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}

pub struct RedbLocalStore {
    db: Database,
}

impl RedbLocalStore {
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;

        // Create the table up front so reads never hit a missing table
        let write_txn = db.begin_write()?;
        {
            let _table = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
        }
        write_txn.commit()?;

        debug!(path = %path.display(), "[LocalStore] Opened");
        Ok(Self { db })
    }

    /// `<data dir>/local_storage.redb`
    pub fn default_path() -> AppResult<PathBuf> {
        let proj_dirs = AppSettings::project_dirs()?;
        Ok(proj_dirs.data_dir().join("local_storage.redb"))
    }

    pub fn open_default() -> AppResult<Self> {
        Self::open(Self::default_path()?)
    }
}

impl LocalStore for RedbLocalStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LOCAL_STORAGE_TABLE)?;
        let value = table.get(key)?.map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

/// Non-persistent store for tests and headless runs.
#[derive(Default)]
pub struct MemoryLocalStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| AppError::Storage(format!("Mutex poisoned: {}", e)))
    }
}

impl LocalStore for MemoryLocalStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}
