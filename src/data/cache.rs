//! In-memory cache of loaded datasets.
//!
//! A table is read once per path and shared as `Arc<Table>` afterwards. The
//! cache never invalidates; restart the process to pick up a changed file.
//! Use [`DatasetCache::global`] for the process-wide instance, or own a
//! [`DatasetCache`] to scope the cache to a session.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use super::error::DataError;
use super::loader::load_file;
use super::model::Table;

#[derive(Debug, Default)]
pub struct DatasetCache {
    tables: Mutex<HashMap<PathBuf, Arc<Table>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global() -> &'static DatasetCache {
        static GLOBAL: OnceLock<DatasetCache> = OnceLock::new();
        GLOBAL.get_or_init(DatasetCache::new)
    }

    /// Return the cached table for `path`, loading it on first use.
    /// Failed loads are not remembered.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Table>, DataError> {
        if let Some(table) = self.get(path) {
            log::debug!("Dataset cache hit for {}", path.display());
            return Ok(table);
        }

        let table = Arc::new(load_file(path)?);
        // Held only for the insert; the first stored table wins.
        let mut guard = self.lock();
        let cached = guard.entry(path.to_path_buf()).or_insert(table);
        Ok(Arc::clone(cached))
    }

    pub fn get(&self, path: &Path) -> Option<Arc<Table>> {
        self.lock().get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Arc<Table>>> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
