//! Store Module
//!
//! The table registry: owns every table and routes operations to them.
//!
//! ## Responsibilities
//! - Create (idempotent) and delete tables
//! - Resolve a table name to its shared handle
//! - Delegate record operations to the resolved table
//!
//! ## Locking
//! ```text
//!   caller ──▶ registry (RwLock, held for lookup only)
//!                  │ Arc<Table> cloned, lock released
//!                  ▼
//!              table (RwLock, held for the operation)
//! ```
//! The two lock levels are never held at the same time, so operations on
//! different tables never contend and no lock ordering can deadlock.

mod memdb;

pub use memdb::MemDb;

use crate::error::Result;
use crate::table::RangeRead;

/// Operations a table store offers to its callers
///
/// Object safe, so a caller can hold a `&dyn TableStore<K, V>` and stay
/// independent of the concrete store.
pub trait TableStore<K, V>: Send + Sync {
    /// Insert or update `key` in `table`
    fn write(&self, table: &str, key: K, value: V) -> Result<()>;

    /// Get a copy of the record under `key`
    fn read(&self, table: &str, key: &K) -> Result<V>;

    /// Copy the records in `[start, end)` plus the end-of-data flag
    fn read_range(&self, table: &str, start: i64, end: i64) -> Result<RangeRead<V>>;

    /// Copy every record in order
    fn read_all(&self, table: &str) -> Result<Vec<V>>;

    /// Remove the record under `key`
    fn delete(&self, table: &str, key: &K) -> Result<()>;

    /// Create `name` if it does not exist yet
    fn create_table(&self, name: &str) -> Result<()>;

    /// Remove `name` and discard its records
    fn delete_table(&self, name: &str) -> Result<()>;

    /// Names of all tables, sorted
    fn table_names(&self) -> Vec<String>;

    /// Number of records in `table`
    fn len(&self, table: &str) -> Result<usize>;
}
