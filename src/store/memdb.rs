//! In-memory table store
//!
//! Registry of named tables with two-level locking.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use super::TableStore;
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::table::{RangeRead, Table};

/// In-memory store: a collection of named tables
///
/// ## Concurrency:
/// - `tables`: RwLock, read-mostly. Lookups share it; create/delete take it
///   exclusively for the map update only.
/// - Each table carries its own RwLock; see [`Table`].
/// - A lookup hands out an `Arc<Table>`. An operation that resolved a table
///   before a concurrent `delete_table` finishes against the detached table;
///   the next lookup sees the table gone.
pub struct MemDb<K, V> {
    /// Store configuration
    config: Config,

    /// name -> table
    tables: RwLock<HashMap<String, Arc<Table<K, V>>>>,
}

impl<K, V> MemDb<K, V>
where
    K: Eq + Hash + Clone + Display,
    V: Clone,
{
    /// Create an empty store with the default config
    pub fn new() -> Self {
        Self::open(Config::default())
    }

    /// Create a store from `config`, creating its preset tables
    pub fn open(config: Config) -> Self {
        let db = Self {
            tables: RwLock::new(HashMap::with_capacity(config.tables.len())),
            config,
        };

        for name in &db.config.tables {
            db.create_table(name);
        }

        db
    }

    // =========================================================================
    // Table Lifecycle
    // =========================================================================

    /// Create a table if it does not exist yet
    ///
    /// Creating an existing table is a no-op: its records are kept.
    pub fn create_table(&self, name: &str) {
        let tables = self.tables.upgradable_read();
        if tables.contains_key(name) {
            return;
        }

        let mut tables = RwLockUpgradableReadGuard::upgrade(tables);
        tables.insert(
            name.to_string(),
            Arc::new(Table::with_capacity(
                name,
                self.config.initial_table_capacity,
            )),
        );

        tracing::debug!(table = name, "created table");
    }

    /// Delete a table and discard its records
    pub fn delete_table(&self, name: &str) -> Result<()> {
        let removed = self.tables.write().remove(name);

        match removed {
            Some(table) => {
                tracing::debug!(table = name, records = table.len(), "deleted table");
                Ok(())
            }
            None => Err(StoreError::table_not_found(name)),
        }
    }

    /// Resolve a table name to its shared handle
    ///
    /// The registry lock is released before this returns.
    pub fn table(&self, name: &str) -> Result<Arc<Table<K, V>>> {
        self.tables
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::table_not_found(name))
    }

    // =========================================================================
    // Record Operations
    // =========================================================================

    /// Insert or update `key` in `table`
    pub fn write(&self, table: &str, key: K, value: V) -> Result<()> {
        self.table(table)?.write(key, value);
        Ok(())
    }

    /// Get a copy of the record under `key` in `table`
    pub fn read<Q>(&self, table: &str, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        self.table(table)?.read(key)
    }

    /// Copy the records in `[start, end)` of `table`
    ///
    /// See [`Table::read_range`] for the clamping rules.
    pub fn read_range(&self, table: &str, start: i64, end: i64) -> Result<RangeRead<V>> {
        self.table(table)?.read_range(start, end)
    }

    /// Copy every record of `table`, in order
    pub fn read_all(&self, table: &str) -> Result<Vec<V>> {
        Ok(self.table(table)?.read_all())
    }

    /// Remove the record under `key` from `table`
    pub fn delete<Q>(&self, table: &str, key: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        self.table(table)?.delete(key)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Check if a table exists
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.read().contains_key(name)
    }

    /// Names of all tables, sorted
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of tables
    pub fn table_count(&self) -> usize {
        self.tables.read().len()
    }

    /// Number of records in `table`
    pub fn len(&self, table: &str) -> Result<usize> {
        Ok(self.table(table)?.len())
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<K, V> Default for MemDb<K, V>
where
    K: Eq + Hash + Clone + Display,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> TableStore<K, V> for MemDb<K, V>
where
    K: Eq + Hash + Clone + Display + Send + Sync,
    V: Clone + Send + Sync,
{
    fn write(&self, table: &str, key: K, value: V) -> Result<()> {
        MemDb::write(self, table, key, value)
    }

    fn read(&self, table: &str, key: &K) -> Result<V> {
        MemDb::read(self, table, key)
    }

    fn read_range(&self, table: &str, start: i64, end: i64) -> Result<RangeRead<V>> {
        MemDb::read_range(self, table, start, end)
    }

    fn read_all(&self, table: &str) -> Result<Vec<V>> {
        MemDb::read_all(self, table)
    }

    fn delete(&self, table: &str, key: &K) -> Result<()> {
        MemDb::delete(self, table, key)
    }

    fn create_table(&self, name: &str) -> Result<()> {
        MemDb::create_table(self, name);
        Ok(())
    }

    fn delete_table(&self, name: &str) -> Result<()> {
        MemDb::delete_table(self, name)
    }

    fn table_names(&self) -> Vec<String> {
        MemDb::table_names(self)
    }

    fn len(&self, table: &str) -> Result<usize> {
        MemDb::len(self, table)
    }
}
