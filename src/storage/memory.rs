//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::Result;
use crate::storage::{Store, Table, TableKey};

/// Tables held in a map; useful for tests and for callers without a disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<TableKey, Table>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tables written so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn tables(&self) -> std::sync::MutexGuard<'_, HashMap<TableKey, Table>> {
        // A poisoned map still holds whole tables; keep using it.
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn exists(&self, key: &TableKey) -> Result<bool> {
        Ok(self.tables().contains_key(key))
    }

    async fn read(&self, key: &TableKey) -> Result<Option<Table>> {
        Ok(self.tables().get(key).cloned())
    }

    async fn write(&self, key: &TableKey, table: &Table) -> Result<()> {
        self.tables().insert(key.clone(), table.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn write_all(&self, tables: &[(TableKey, Table)]) -> Result<()> {
        let mut map = self.tables();
        for (key, table) in tables {
            map.insert(key.clone(), table.clone());
        }
        self.writes.fetch_add(tables.len(), Ordering::SeqCst);
        Ok(())
    }
}
